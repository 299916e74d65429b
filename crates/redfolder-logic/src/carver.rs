//! Objective placement and boundary carving, the randomized second phase.
//!
//! Objectives are sampled first. Then every playable cell gets its four
//! boundaries from the rules below, applied in order so later rules win:
//!
//! 1. Staging cells: outer and lateral band edges are walls, the connector
//!    at the top of the band is a door in the centre column only, and
//!    everything else inside the band is open plan (`Boundary::None`).
//! 2. Building cells: edges leaving the building are walls, the seam with
//!    staging is a door only at the entrance, and internal edges are doors
//!    downgraded to walls with probability `wall_chance`.
//! 3. Shared edges are decided once: a cell copies the reciprocal value
//!    from any neighbour that came earlier in row-major order.
//! 4. Objectives are walled in except for their single open direction.
//! 5. Neighbours of objectives face them with a door only where the
//!    objective opens toward them.

use std::collections::{HashSet, VecDeque};

use log::debug;
use rand::Rng;

use crate::constants::OBJECTIVE_NAMES;
use crate::error::GenerationError;
use crate::grid::{Boundaries, Boundary, Coord, Direction, Grid, Item, RoomType};
use crate::zones::{Zone, ZoneLayout};

/// Where an objective goes and which side has its only door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectivePlacement {
    pub coord: Coord,
    pub open: Direction,
}

impl ObjectivePlacement {
    /// The cell the objective's door leads into.
    pub fn target(&self) -> Coord {
        self.coord.step(self.open)
    }
}

/// Display name for the `index`-th objective.
pub fn objective_name(index: usize) -> String {
    OBJECTIVE_NAMES
        .get(index)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Objective {}", index + 1))
}

/// Pick `count` objective cells, each with one open direction.
///
/// Each objective gets up to `attempts` uniform samples over the building
/// zone. The entrance (and exit, if any) is reserved up front.
pub fn select_objectives<R: Rng + ?Sized>(
    layout: &ZoneLayout,
    count: usize,
    attempts: u32,
    rng: &mut R,
) -> Result<Vec<ObjectivePlacement>, GenerationError> {
    let mut reserved: HashSet<Coord> = HashSet::new();
    reserved.insert(layout.entrance());
    if let Some(exit) = layout.exit() {
        reserved.insert(exit);
    }

    let mut placements: Vec<ObjectivePlacement> = Vec::with_capacity(count);
    for index in 0..count {
        let placed =
            (0..attempts).find_map(|_| sample_objective(layout, &reserved, &placements, rng));
        match placed {
            Some(p) => {
                debug!(
                    "objective #{} at {} opens {:?} into {}",
                    index,
                    p.coord,
                    p.open,
                    p.target()
                );
                placements.push(p);
            }
            None => {
                return Err(GenerationError::PlacementExhausted {
                    feature: "objective",
                    index,
                    attempts,
                })
            }
        }
    }
    Ok(placements)
}

/// One sampling attempt. `None` means "resample".
fn sample_objective<R: Rng + ?Sized>(
    layout: &ZoneLayout,
    reserved: &HashSet<Coord>,
    placed: &[ObjectivePlacement],
    rng: &mut R,
) -> Option<ObjectivePlacement> {
    let x = rng.gen_range(0..layout.width as i32);
    let y = rng.gen_range(layout.boundary_row as i32..layout.height as i32);
    let coord = Coord::new(x, y);

    let taken = |c: Coord| placed.iter().any(|p| p.coord == c);
    if reserved.contains(&coord) || taken(coord) {
        return None;
    }

    let open_dirs: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&d| {
            let n = coord.step(d);
            layout.is_building(n) && !taken(n)
        })
        .collect();
    if open_dirs.is_empty() {
        return None;
    }

    let open = open_dirs[rng.gen_range(0..open_dirs.len())];
    let candidate = ObjectivePlacement { coord, open };
    placement_is_sound(layout, placed, candidate).then_some(candidate)
}

/// A candidate is sound if no objective's door leads into another objective
/// and the remaining building cells still form one 4-connected region.
/// Together these guarantee the repairer always has a legal carve.
pub fn placement_is_sound(
    layout: &ZoneLayout,
    placed: &[ObjectivePlacement],
    candidate: ObjectivePlacement,
) -> bool {
    if placed.iter().any(|p| p.target() == candidate.coord) {
        return false;
    }

    let blocked: HashSet<Coord> = placed
        .iter()
        .map(|p| p.coord)
        .chain(std::iter::once(candidate.coord))
        .collect();
    if blocked.contains(&candidate.target()) {
        return false;
    }

    let origin = layout.entrance();
    if blocked.contains(&origin) {
        return false;
    }
    let open_cells = layout.building_cell_count() - blocked.len();

    let mut seen: HashSet<Coord> = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(origin);
    queue.push_back(origin);
    while let Some(c) = queue.pop_front() {
        for dir in Direction::ALL {
            let n = c.step(dir);
            if layout.is_building(n) && !blocked.contains(&n) && seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    seen.len() == open_cells
}

/// Derive every room's final boundaries and apply objective overrides.
pub fn carve_boundaries<R: Rng + ?Sized>(
    grid: &mut Grid,
    layout: &ZoneLayout,
    placements: &[ObjectivePlacement],
    wall_chance: f64,
    rng: &mut R,
) {
    for y in 0..layout.height as i32 {
        for x in 0..layout.width as i32 {
            let c = Coord::new(x, y);
            match layout.zone_of(c) {
                Zone::Staging => {
                    for dir in Direction::ALL {
                        grid.set_boundary(c, dir, staging_boundary(layout, c, dir));
                    }
                }
                Zone::Building => {
                    for dir in Direction::ALL {
                        let value = building_boundary(grid, layout, c, dir, wall_chance, rng);
                        grid.set_boundary(c, dir, value);
                    }
                }
                Zone::Outside => {}
            }
        }
    }

    apply_objectives(grid, placements);
    face_objectives(grid, layout);
}

fn staging_boundary(layout: &ZoneLayout, c: Coord, dir: Direction) -> Boundary {
    match dir {
        Direction::S if c.y == 0 => Boundary::Wall,
        Direction::N if c.y == layout.staging_top_row() => {
            if c.x == layout.centre_column() {
                Boundary::Door
            } else {
                Boundary::Wall
            }
        }
        Direction::W if c.x == layout.band_min => Boundary::Wall,
        Direction::E if c.x == layout.band_max => Boundary::Wall,
        _ => Boundary::None,
    }
}

fn building_boundary<R: Rng + ?Sized>(
    grid: &Grid,
    layout: &ZoneLayout,
    c: Coord,
    dir: Direction,
    wall_chance: f64,
    rng: &mut R,
) -> Boundary {
    // Seam with the staging zone
    if dir == Direction::S && c.y == layout.boundary_row as i32 {
        return if c.x == layout.centre_column() {
            Boundary::Door
        } else {
            Boundary::Wall
        };
    }

    let n = c.step(dir);
    if !layout.is_building(n) {
        return Boundary::Wall;
    }

    // Earlier cells already decided this edge.
    if (n.y, n.x) < (c.y, c.x) {
        return grid
            .room_at(n)
            .map(|r| r.boundary(dir.opposite()))
            .unwrap_or(Boundary::Wall);
    }

    if rng.gen::<f64>() < wall_chance {
        Boundary::Wall
    } else {
        Boundary::Door
    }
}

fn apply_objectives(grid: &mut Grid, placements: &[ObjectivePlacement]) {
    for (index, p) in placements.iter().enumerate() {
        let Some(room) = grid.room_at_mut(p.coord) else {
            continue;
        };
        let mut boundaries = Boundaries::uniform(Boundary::Wall);
        boundaries.set(p.open, Boundary::Door);
        room.boundaries = boundaries;
        room.room_type = RoomType::Objective;
        room.name = objective_name(index);
        room.items = vec![Item::RedFolder];
    }
}

/// Every non-objective building cell re-checks its four neighbours and
/// matches whatever an adjacent objective shows on the shared edge.
fn face_objectives(grid: &mut Grid, layout: &ZoneLayout) {
    for c in layout.building_cells() {
        if grid.room_at(c).map(|r| r.room_type) == Some(RoomType::Objective) {
            continue;
        }
        for dir in Direction::ALL {
            let facing = grid
                .room_at(c.step(dir))
                .filter(|r| r.room_type == RoomType::Objective)
                .map(|r| r.boundary(dir.opposite()));
            if let Some(objective_side) = facing {
                let value = if objective_side == Boundary::Door {
                    Boundary::Door
                } else {
                    Boundary::Wall
                };
                grid.set_boundary(c, dir, value);
            }
        }
    }
}
