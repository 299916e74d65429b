//! Reachability repair, the third phase.
//!
//! BFS from Start over passable edges. While playable cells remain
//! unreached, carve one door between an unreached cell and a reached
//! neighbour, then search again. Carves are deterministic (row-major over
//! cells, `Direction::ALL` order over edges), never touch an objective's
//! walls and never cross the staging/building seam.

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, error};

use crate::error::GenerationError;
use crate::grid::{Boundary, Coord, Direction, Grid, RoomType};
use crate::zones::ZoneLayout;

/// What the repairer changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Carved edges, as (unreached cell, direction toward reached neighbour).
    pub carved: Vec<(Coord, Direction)>,
}

impl RepairReport {
    pub fn doors_carved(&self) -> usize {
        self.carved.len()
    }
}

/// All playable cells reachable from `origin` without crossing a wall.
pub fn reachable_from(grid: &Grid, origin: Coord) -> HashSet<Coord> {
    distances_from(grid, origin).into_keys().collect()
}

/// BFS step count from `origin` to every reachable playable cell.
pub fn distances_from(grid: &Grid, origin: Coord) -> HashMap<Coord, usize> {
    let mut dist = HashMap::new();
    if !grid.room_at(origin).is_some_and(|r| r.is_playable()) {
        return dist;
    }

    let mut queue = VecDeque::new();
    dist.insert(origin, 0);
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        let Some(room) = grid.room_at(current) else {
            continue;
        };
        let steps = dist[&current] + 1;
        for dir in Direction::ALL {
            if !room.boundary(dir).is_passable() {
                continue;
            }
            if let Some(next) = grid.playable_neighbor(current, dir) {
                if !dist.contains_key(&next.coord) {
                    dist.insert(next.coord, steps);
                    queue.push_back(next.coord);
                }
            }
        }
    }

    dist
}

/// Playable cells not reachable from Start, row-major.
pub fn unreached_cells(grid: &Grid) -> Vec<Coord> {
    let reached = match grid.start() {
        Some(start) => reachable_from(grid, start.coord),
        None => HashSet::new(),
    };
    grid.playable_rooms()
        .map(|r| r.coord)
        .filter(|c| !reached.contains(c))
        .collect()
}

/// Whether the repairer may open the edge from `c` toward `dir`.
fn is_carvable(grid: &Grid, layout: &ZoneLayout, c: Coord, dir: Direction) -> bool {
    let n = c.step(dir);
    let (Some(a), Some(b)) = (grid.room_at(c), grid.room_at(n)) else {
        return false;
    };
    a.is_playable()
        && b.is_playable()
        && a.room_type != RoomType::Objective
        && b.room_type != RoomType::Objective
        && layout.zone_of(c) == layout.zone_of(n)
}

/// Carve doors until every playable cell is reachable from Start.
///
/// Fails with `ConnectivityRepairExhausted` once `budget` carves have been
/// spent, or as soon as no legal carve is left.
pub fn repair_connectivity(
    grid: &mut Grid,
    layout: &ZoneLayout,
    budget: u32,
) -> Result<RepairReport, GenerationError> {
    let mut report = RepairReport::default();
    let start = layout.start();

    loop {
        let reached = reachable_from(grid, start);
        if reached.len() == grid.playable_count() {
            return Ok(report);
        }

        let unreached: Vec<Coord> = grid
            .playable_rooms()
            .map(|r| r.coord)
            .filter(|c| !reached.contains(c))
            .collect();

        let carved = report.carved.len() as u32;
        if carved >= budget {
            error!(
                "connectivity repair budget of {} spent with {} cells unreached",
                budget,
                unreached.len()
            );
            return Err(GenerationError::ConnectivityRepairExhausted { unreached, carved });
        }

        let candidate = unreached.iter().find_map(|&c| {
            Direction::ALL.into_iter().find(|&dir| {
                reached.contains(&c.step(dir)) && is_carvable(grid, layout, c, dir)
            })
            .map(|dir| (c, dir))
        });

        let Some((c, dir)) = candidate else {
            error!(
                "connectivity repair stuck: no carvable edge next to {} unreached cells",
                unreached.len()
            );
            return Err(GenerationError::ConnectivityRepairExhausted { unreached, carved });
        };

        debug!("carving door {} {:?}", c, dir);
        grid.set_shared_edge(c, dir, Boundary::Door);
        report.carved.push((c, dir));
    }
}
