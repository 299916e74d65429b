//! Level generation pipeline.
//!
//! Three phases over one grid, in order:
//!   1. allocate_rooms       -- zone membership, room types, closed rooms
//!   2. select_objectives    -- random objective cells + open directions
//!      carve_boundaries     -- zone rules, random walls, objective overrides
//!   3. repair_connectivity  -- carve doors until Start reaches everything
//!
//! A final `validate_grid` pass turns any broken invariant into an error,
//! so callers only ever see fully consistent grids. Retrying is the
//! caller's choice; `generate_with_retries` is the stock policy.

use log::{error, info, warn};
use rand::Rng;

use crate::allocator::allocate_rooms;
use crate::carver::{carve_boundaries, select_objectives, ObjectivePlacement};
use crate::config::{validate_config, GeneratorConfig};
use crate::error::GenerationError;
use crate::grid::Grid;
use crate::repair::{repair_connectivity, RepairReport};
use crate::rng::{level_rng, retry_seed};
use crate::validation::{errors_only, validate_grid};
use crate::zones::ZoneLayout;

/// A finished grid plus what it took to build it.
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    pub grid: Grid,
    pub layout: ZoneLayout,
    pub placements: Vec<ObjectivePlacement>,
    pub repair: RepairReport,
    /// Seed that produced this grid, when known.
    pub seed: Option<u64>,
}

/// Generate a level with default settings and the given footprint.
pub fn generate(
    width: usize,
    height: usize,
    zone_boundary_row: usize,
) -> Result<Grid, GenerationError> {
    let config = GeneratorConfig::with_dimensions(width, height, zone_boundary_row);
    generate_with_rng(&config, &mut rand::thread_rng())
}

/// Generate from a full config, seeded from `config.seed` when present.
pub fn generate_with_config(config: &GeneratorConfig) -> Result<Grid, GenerationError> {
    let mut rng = level_rng(config.seed);
    generate_level(config, &mut rng).map(|level| level.grid)
}

/// Generate using a caller-supplied RNG.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Grid, GenerationError> {
    generate_level(config, rng).map(|level| level.grid)
}

/// Run all three phases and the final validation.
pub fn generate_level<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<GeneratedLevel, GenerationError> {
    let config_errors = validate_config(config);
    if !config_errors.is_empty() {
        return Err(config_errors.into());
    }

    let layout = ZoneLayout::from_config(config);
    let mut grid = allocate_rooms(&layout);

    let placements = select_objectives(
        &layout,
        config.objective_count,
        config.objective_attempts,
        rng,
    )?;
    carve_boundaries(&mut grid, &layout, &placements, config.wall_chance, rng);

    let repair = repair_connectivity(&mut grid, &layout, config.repair_budget)?;

    let violations = errors_only(validate_grid(
        &grid,
        layout.start(),
        config.objective_count,
    ));
    if !violations.is_empty() {
        for v in &violations {
            error!("[{}] {}", v.category, v.message);
        }
        return Err(GenerationError::InvariantViolation(violations));
    }

    info!(
        "Generated {}×{} level: {} playable rooms, {} objectives, {} door(s) carved by repair",
        layout.width,
        layout.height,
        grid.playable_count(),
        placements.len(),
        repair.doors_carved()
    );

    Ok(GeneratedLevel {
        grid,
        layout,
        placements,
        repair,
        seed: config.seed,
    })
}

/// Regenerate from scratch until a level comes out, up to `max_attempts`.
///
/// Each attempt uses its own seed derived from `config.seed` (or a random
/// base), so a failure is never replayed. Config errors are returned
/// immediately since no reseed can fix them.
pub fn generate_with_retries(
    config: &GeneratorConfig,
    max_attempts: u32,
) -> Result<GeneratedLevel, GenerationError> {
    let base = config.seed.unwrap_or_else(rand::random);
    let mut last_error = None;

    for attempt in 0..max_attempts.max(1) {
        let seed = retry_seed(base, attempt);
        let mut rng = level_rng(Some(seed));
        match generate_level(config, &mut rng) {
            Ok(mut level) => {
                level.seed = Some(seed);
                return Ok(level);
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                warn!("Generation attempt {} (seed {}) failed: {}", attempt + 1, seed, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| GenerationError::PlacementExhausted {
        feature: "level",
        index: 0,
        attempts: 0,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Boundary, Coord, RoomType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded(seed: u64) -> GeneratorConfig {
        GeneratorConfig::default().with_seed(seed)
    }

    #[test]
    fn default_level_is_valid() {
        let level = generate_level(&seeded(1), &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        assert!(errors_only(validate_grid(&level.grid, Coord::new(3, 0), 3)).is_empty());
        assert_eq!(level.placements.len(), 3);
    }

    #[test]
    fn generate_uses_given_footprint() {
        let grid = generate(9, 12, 4).unwrap();
        assert_eq!((grid.width(), grid.height()), (9, 12));
        assert_eq!(grid.start().unwrap().coord, Coord::new(4, 0));
        assert_eq!(grid.objectives().count(), 3);
    }

    #[test]
    fn same_seed_same_grid() {
        let a = generate_with_config(&seeded(77)).unwrap();
        let b = generate_with_config(&seeded(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let grids: Vec<_> = (0..5)
            .map(|s| generate_with_config(&seeded(s)).unwrap())
            .collect();
        assert!(grids.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = GeneratorConfig {
            width: 0,
            ..Default::default()
        };
        let err = generate_with_config(&config).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidConfig(_)));
        assert!(generate_with_retries(&config, 5).is_err());
    }

    #[test]
    fn oversized_staging_band_is_a_config_error() {
        let config = GeneratorConfig {
            staging_half_width: 1 << 31,
            seed: Some(1),
            ..Default::default()
        };
        match generate_with_config(&config) {
            Err(GenerationError::InvalidConfig(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn unplaceable_objective_fails_instead_of_hanging() {
        // building zone is a single (reserved) cell
        let config = GeneratorConfig {
            width: 1,
            height: 3,
            zone_boundary_row: 2,
            objective_count: 1,
            seed: Some(0),
            ..Default::default()
        };
        let err = generate_with_config(&config).unwrap_err();
        assert!(matches!(err, GenerationError::PlacementExhausted { .. }));

        // retries don't help either, and still terminate
        let err = generate_with_retries(&config, 3).unwrap_err();
        assert!(matches!(err, GenerationError::PlacementExhausted { .. }));
    }

    #[test]
    fn tiny_budget_surfaces_repair_failure() {
        let config = GeneratorConfig {
            wall_chance: 1.0,
            repair_budget: 3,
            seed: Some(5),
            ..Default::default()
        };
        let err = generate_with_config(&config).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::ConnectivityRepairExhausted { carved: 3, .. }
        ));
    }

    #[test]
    fn retries_report_the_winning_seed() {
        let level = generate_with_retries(&seeded(10), 5).unwrap();
        // first attempt succeeds on the default layout
        assert_eq!(level.seed, Some(10));
        assert_eq!(level.grid, generate_with_config(&seeded(10)).unwrap());
    }

    #[test]
    fn exit_room_is_reachable() {
        let config = GeneratorConfig {
            place_exit: true,
            seed: Some(3),
            ..Default::default()
        };
        let grid = generate_with_config(&config).unwrap();
        let exit = grid.rooms_of_type(RoomType::End).next().unwrap();
        assert_eq!(exit.coord, Coord::new(3, 9));
        assert_eq!(exit.boundary(crate::grid::Direction::N), Boundary::Wall);
        assert!(crate::repair::unreached_cells(&grid).is_empty());
    }

    #[test]
    fn zero_objectives_is_allowed() {
        let config = GeneratorConfig {
            objective_count: 0,
            seed: Some(9),
            ..Default::default()
        };
        let grid = generate_with_config(&config).unwrap();
        assert_eq!(grid.objectives().count(), 0);
    }
}
