//! ASCII map of a grid, for terminals and test failure output.
//!
//! Top row first. Each cell is a 5-char block `-[G]-` where the dashes
//! appear only for passable east/west edges; between rows a `|` marks a
//! passable north edge.

use crate::grid::{Direction, Grid, Room, RoomType};

/// Single-character glyph for a room type.
pub fn glyph(room_type: RoomType) -> char {
    match room_type {
        RoomType::Start => 'S',
        RoomType::Staging => 'P',
        RoomType::Normal => '.',
        RoomType::Objective => 'O',
        RoomType::End => 'E',
        RoomType::Empty => 'X',
    }
}

fn edge_open(grid: &Grid, room: &Room, dir: Direction) -> bool {
    room.is_playable()
        && room.boundary(dir).is_passable()
        && grid.playable_neighbor(room.coord, dir).is_some()
}

/// Render the whole grid, one text line per row plus connector lines.
pub fn render_ascii(grid: &Grid) -> String {
    let mut out = String::new();

    for y in (0..grid.height() as i32).rev() {
        if y + 1 < grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let open = grid
                    .room(x, y)
                    .is_some_and(|r| edge_open(grid, r, Direction::N));
                out.push_str(if open { "  |  " } else { "     " });
            }
            out.push('\n');
        }

        for x in 0..grid.width() as i32 {
            let Some(room) = grid.room(x, y) else {
                out.push_str("     ");
                continue;
            };
            if !room.is_playable() {
                out.push_str("  X  ");
                continue;
            }
            out.push(if edge_open(grid, room, Direction::W) { '-' } else { ' ' });
            out.push('[');
            out.push(glyph(room.room_type));
            out.push(']');
            out.push(if edge_open(grid, room, Direction::E) { '-' } else { ' ' });
        }
        out.push('\n');
    }

    out
}

/// One line per room type present, e.g. `S Entrance`.
pub fn legend(grid: &Grid) -> String {
    let types = [
        RoomType::Start,
        RoomType::Staging,
        RoomType::Normal,
        RoomType::Objective,
        RoomType::End,
        RoomType::Empty,
    ];
    types
        .into_iter()
        .filter(|&t| grid.rooms_of_type(t).next().is_some())
        .map(|t| format!("{} {}", glyph(t), t.default_name()))
        .collect::<Vec<_>>()
        .join("\n")
}
