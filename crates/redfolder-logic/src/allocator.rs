//! Zone & room allocation, the deterministic first phase.
//!
//! Instantiates one `Room` per cell: Start at the fixed start coordinate,
//! Staging for the rest of the band, Normal across the building and Empty
//! outside the footprint. Playable rooms start fully walled; Empty rooms
//! get `Boundary::None` everywhere.

use crate::grid::{Coord, Grid, Room, RoomId, RoomType};
use crate::zones::{Zone, ZoneLayout};

/// Room type assigned before objectives are chosen.
pub fn initial_room_type(layout: &ZoneLayout, c: Coord) -> RoomType {
    match layout.zone_of(c) {
        Zone::Staging if c == layout.start() => RoomType::Start,
        Zone::Staging => RoomType::Staging,
        Zone::Building if layout.exit() == Some(c) => RoomType::End,
        Zone::Building => RoomType::Normal,
        Zone::Outside => RoomType::Empty,
    }
}

/// Build the initial grid. No randomness.
pub fn allocate_rooms(layout: &ZoneLayout) -> Grid {
    let mut next_id = 0u32;
    Grid::from_fn(layout.width, layout.height, |c| {
        let room = Room::new(RoomId(next_id), c, initial_room_type(layout, c));
        next_id += 1;
        room
    })
}
