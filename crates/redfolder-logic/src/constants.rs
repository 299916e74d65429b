//! Level generation constants: default dimensions, budgets and odds.
//!
//! Plain values with no dependencies. `GeneratorConfig::default()` is
//! assembled from these.

/// Default grid width in cells. Odd, so the staging band has a centre column.
pub const DEFAULT_WIDTH: usize = 7;

/// Default grid height in cells (staging rows + building rows).
pub const DEFAULT_HEIGHT: usize = 10;

/// First building row. Rows below it belong to the staging zone.
pub const DEFAULT_ZONE_BOUNDARY_ROW: usize = 3;

/// Columns on each side of the centre column that belong to the staging band.
pub const DEFAULT_STAGING_HALF_WIDTH: usize = 1;

/// Objective rooms per level.
pub const DEFAULT_OBJECTIVE_COUNT: usize = 3;

/// Random samples allowed per objective before placement gives up.
pub const DEFAULT_OBJECTIVE_ATTEMPTS: u32 = 200;

/// Chance that an internal building edge is rolled as a wall.
pub const DEFAULT_WALL_CHANCE: f64 = 0.3;

/// Doors the reachability repairer may carve before giving up.
pub const DEFAULT_REPAIR_BUDGET: u32 = 100;

/// Full regenerations the harness allows before reporting a hard failure.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Objectives closer than this many steps to Start are flagged as too easy.
pub const NEAR_OBJECTIVE_STEPS: usize = 5;

/// Display names for objective rooms, in placement order.
pub const OBJECTIVE_NAMES: [&str; 3] = ["Archive", "Laboratory", "Director's Office"];
