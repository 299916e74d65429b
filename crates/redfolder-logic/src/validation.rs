//! Invariant checks for generated grids.
//!
//! Pure functions that take a finished `Grid` and return validation errors.
//! The generator runs `validate_grid` before handing a grid out; the
//! harness and the integration tests run it over seed sweeps.

use crate::constants::NEAR_OBJECTIVE_STEPS;
use crate::grid::{Boundary, Coord, Direction, Grid, Item, RoomType};
use crate::repair::{distances_from, unreached_cells};

/// A grid validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

fn error(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Error,
        message,
    }
}

// ── A. Room roles ───────────────────────────────────────────────────────

/// Exactly one Start room, at the expected coordinate.
pub fn check_start(grid: &Grid, expected: Coord) -> Vec<ValidationError> {
    let starts: Vec<_> = grid.rooms_of_type(RoomType::Start).collect();
    let mut errors = Vec::new();
    if starts.len() != 1 {
        errors.push(error(
            "start",
            format!("expected exactly 1 start room, found {}", starts.len()),
        ));
    }
    for s in starts {
        if s.coord != expected {
            errors.push(error(
                "start",
                format!("start room at {}, expected {}", s.coord, expected),
            ));
        }
    }
    errors
}

/// `expected` objectives, each with one door, three walls and one folder.
pub fn check_objectives(grid: &Grid, expected: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let count = grid.objectives().count();
    if count != expected {
        errors.push(error(
            "objective",
            format!("expected {} objective rooms, found {}", expected, count),
        ));
    }
    for o in grid.objectives() {
        let doors = o.boundaries.count(Boundary::Door);
        let walls = o.boundaries.count(Boundary::Wall);
        if doors != 1 || walls != 3 {
            errors.push(error(
                "objective",
                format!(
                    "objective {} has {} door(s) and {} wall(s), expected 1 and 3",
                    o.coord, doors, walls
                ),
            ));
        }
    }
    errors
}

/// Folders only in objective rooms, at most one each.
pub fn check_items(grid: &Grid) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for room in grid.rooms() {
        let folders = room.items.iter().filter(|&&i| i == Item::RedFolder).count();
        if folders > 1 {
            errors.push(error(
                "items",
                format!("room {} holds {} folders", room.coord, folders),
            ));
        }
        if folders > 0 && room.room_type != RoomType::Objective {
            errors.push(error(
                "items",
                format!("{:?} room {} holds a folder", room.room_type, room.coord),
            ));
        }
    }
    errors
}

// ── B. Edges ────────────────────────────────────────────────────────────

/// Both sides of every edge between playable cells agree on passability.
pub fn check_edge_symmetry(grid: &Grid) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for room in grid.playable_rooms() {
        // Each edge once: look north and east only.
        for dir in [Direction::N, Direction::E] {
            let Some(nb) = grid.playable_neighbor(room.coord, dir) else {
                continue;
            };
            let here = room.boundary(dir);
            let there = nb.boundary(dir.opposite());
            if here.is_passable() != there.is_passable() {
                errors.push(error(
                    "edge_symmetry",
                    format!(
                        "edge {} {:?} is {:?} but {} sees {:?}",
                        room.coord, dir, here, nb.coord, there
                    ),
                ));
            }
        }
    }
    errors
}

/// Rooms on the grid rim must not open onto the outside.
pub fn check_outer_walls(grid: &Grid) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for room in grid.playable_rooms() {
        for dir in Direction::ALL {
            if grid.neighbor(room.coord, dir).is_none() && room.boundary(dir).is_passable() {
                errors.push(error(
                    "outer_walls",
                    format!("room {} opens {:?} off the grid", room.coord, dir),
                ));
            }
        }
    }
    errors
}

// ── C. Connectivity ─────────────────────────────────────────────────────

/// Every playable cell reachable from Start.
pub fn check_reachability(grid: &Grid) -> Vec<ValidationError> {
    let unreached = unreached_cells(grid);
    if unreached.is_empty() {
        return Vec::new();
    }
    let listed: Vec<String> = unreached.iter().take(8).map(|c| c.to_string()).collect();
    vec![error(
        "reachability",
        format!(
            "{} playable cell(s) unreachable from start: {}{}",
            unreached.len(),
            listed.join(", "),
            if unreached.len() > listed.len() { ", …" } else { "" }
        ),
    )]
}

/// Objectives a player can walk into almost straight from Start.
///
/// Legal but makes for a dull level, so only a warning.
pub fn check_objective_distance(grid: &Grid) -> Vec<ValidationError> {
    let Some(start) = grid.start() else {
        return Vec::new();
    };
    let dist = distances_from(grid, start.coord);
    grid.objectives()
        .filter_map(|o| dist.get(&o.coord).map(|&d| (o, d)))
        .filter(|&(_, d)| d < NEAR_OBJECTIVE_STEPS)
        .map(|(o, d)| ValidationError {
            category: "objective_distance",
            severity: Severity::Warning,
            message: format!("{} at {} is only {} step(s) from start", o.name, o.coord, d),
        })
        .collect()
}

/// Run every check.
pub fn validate_grid(
    grid: &Grid,
    start: Coord,
    objectives: usize,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(check_start(grid, start));
    errors.extend(check_objectives(grid, objectives));
    errors.extend(check_items(grid));
    errors.extend(check_edge_symmetry(grid));
    errors.extend(check_outer_walls(grid));
    errors.extend(check_reachability(grid));
    errors.extend(check_objective_distance(grid));
    errors
}

/// Only the `Severity::Error` entries.
pub fn errors_only(results: Vec<ValidationError>) -> Vec<ValidationError> {
    results
        .into_iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::allocate_rooms;
    use crate::carver::{carve_boundaries, select_objectives, ObjectivePlacement};
    use crate::repair::repair_connectivity;
    use crate::zones::ZoneLayout;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn finished_grid(seed: u64) -> (Grid, ZoneLayout) {
        let layout = ZoneLayout::new(7, 10, 3, 1, false);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let placements = select_objectives(&layout, 3, 200, &mut rng).unwrap();
        let mut grid = allocate_rooms(&layout);
        carve_boundaries(&mut grid, &layout, &placements, 0.3, &mut rng);
        repair_connectivity(&mut grid, &layout, 100).unwrap();
        (grid, layout)
    }

    #[test]
    fn finished_grid_passes() {
        let (grid, layout) = finished_grid(21);
        let errors = errors_only(validate_grid(&grid, layout.start(), 3));
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn detects_asymmetric_edge() {
        let (mut grid, _) = finished_grid(21);
        let c = Coord::new(3, 3);
        grid.set_boundary(c, Direction::N, Boundary::Door);
        grid.set_boundary(c.step(Direction::N), Direction::S, Boundary::Wall);
        let errors = check_edge_symmetry(&grid);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, "edge_symmetry");
    }

    #[test]
    fn detects_wrong_objective_count() {
        let (grid, _) = finished_grid(3);
        assert_eq!(check_objectives(&grid, 4).len(), 1);
    }

    #[test]
    fn detects_second_door_on_objective() {
        let (mut grid, _) = finished_grid(4);
        let o = grid.objectives().next().unwrap().clone();
        let extra = Direction::ALL
            .into_iter()
            .find(|&d| o.boundary(d) == Boundary::Wall)
            .unwrap();
        grid.set_boundary(o.coord, extra, Boundary::Door);
        assert_eq!(check_objectives(&grid, 3).len(), 1);
    }

    #[test]
    fn detects_isolated_cell() {
        let (mut grid, _) = finished_grid(5);
        let c = Coord::new(0, 9);
        for dir in Direction::ALL {
            grid.set_shared_edge(c, dir, Boundary::Wall);
        }
        let errors = check_reachability(&grid);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("(0, 9)"));
    }

    #[test]
    fn detects_moved_start() {
        let (grid, _) = finished_grid(6);
        assert_eq!(check_start(&grid, Coord::new(2, 0)).len(), 1);
    }

    #[test]
    fn detects_stray_folder() {
        let (mut grid, layout) = finished_grid(7);
        if let Some(r) = grid.room_at_mut(layout.entrance()) {
            r.items.push(Item::RedFolder);
        }
        assert_eq!(check_items(&grid).len(), 1);
    }

    #[test]
    fn detects_opening_off_grid() {
        let (mut grid, _) = finished_grid(8);
        grid.set_boundary(Coord::new(0, 5), Direction::W, Boundary::Door);
        assert_eq!(check_outer_walls(&grid).len(), 1);
    }

    fn open_plan_with(layout: &ZoneLayout, placements: &[ObjectivePlacement]) -> Grid {
        let mut grid = allocate_rooms(layout);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        carve_boundaries(&mut grid, layout, placements, 0.0, &mut rng);
        repair_connectivity(&mut grid, layout, 100).unwrap();
        grid
    }

    #[test]
    fn warns_about_objective_next_to_entrance() {
        let layout = ZoneLayout::new(7, 10, 3, 1, false);
        let near = ObjectivePlacement {
            coord: Coord::new(2, 3),
            open: Direction::E,
        };
        let grid = open_plan_with(&layout, &[near]);

        let warnings = check_objective_distance(&grid);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert!(warnings[0].message.contains("4 step(s)"));

        // a warning alone never fails the grid
        assert!(!validate_grid(&grid, layout.start(), 1).is_empty());
        assert!(errors_only(validate_grid(&grid, layout.start(), 1)).is_empty());
    }

    #[test]
    fn distant_objective_is_quiet() {
        let layout = ZoneLayout::new(7, 10, 3, 1, false);
        let far = ObjectivePlacement {
            coord: Coord::new(0, 9),
            open: Direction::E,
        };
        let grid = open_plan_with(&layout, &[far]);
        assert!(check_objective_distance(&grid).is_empty());
    }

    #[test]
    fn errors_only_drops_warnings() {
        let results = vec![
            ValidationError {
                category: "x",
                severity: Severity::Warning,
                message: String::new(),
            },
            error("y", String::new()),
        ];
        let errs = errors_only(results);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].category, "y");
    }
}
