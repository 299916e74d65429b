//! Generator configuration and validation.
//!
//! `GeneratorConfig` carries every tunable of a level: dimensions, the zone
//! boundary, objective budget, wall odds and the repair budget. It is plain
//! serde data so the harness can load it from JSON.
//!
//! ```
//! use redfolder_logic::config::{validate_config, GeneratorConfig};
//!
//! let mut config = GeneratorConfig::default();
//! config.seed = Some(7);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Everything `generate` needs to know about a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    /// First building row; rows below are staging.
    pub zone_boundary_row: usize,
    /// Staging band columns on each side of the centre column.
    pub staging_half_width: usize,
    pub objective_count: usize,
    /// Samples per objective before `PlacementExhausted`.
    pub objective_attempts: u32,
    /// Probability (0–1) that an internal building edge becomes a wall.
    pub wall_chance: f64,
    /// Maximum doors the reachability repairer may carve.
    pub repair_budget: u32,
    /// Put an End room at the top of the centre column.
    pub place_exit: bool,
    /// Random seed for generation (None = random).
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            zone_boundary_row: DEFAULT_ZONE_BOUNDARY_ROW,
            staging_half_width: DEFAULT_STAGING_HALF_WIDTH,
            objective_count: DEFAULT_OBJECTIVE_COUNT,
            objective_attempts: DEFAULT_OBJECTIVE_ATTEMPTS,
            wall_chance: DEFAULT_WALL_CHANCE,
            repair_budget: DEFAULT_REPAIR_BUDGET,
            place_exit: false,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Defaults with the given footprint.
    pub fn with_dimensions(width: usize, height: usize, zone_boundary_row: usize) -> Self {
        Self {
            width,
            height,
            zone_boundary_row,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Width is zero.
    ZeroWidth,
    /// Boundary row must leave at least one staging row and one building row.
    BoundaryOutOfRange { row: usize, height: usize },
    /// Wall chance outside `[0, 1]`.
    InvalidWallChance(f64),
    /// Objectives requested but no attempts allowed to place them.
    ZeroObjectiveAttempts,
    /// The exit would sit on the building entrance.
    NoRoomForExit,
    /// Staging half width larger than the grid itself.
    StagingTooWide { half_width: usize, width: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroWidth => write!(f, "grid width must be at least 1"),
            ConfigError::BoundaryOutOfRange { row, height } => write!(
                f,
                "zone boundary row {} must lie in 1..{} for a grid of height {}",
                row, height, height
            ),
            ConfigError::InvalidWallChance(p) => {
                write!(f, "wall chance {} is outside [0, 1]", p)
            }
            ConfigError::ZeroObjectiveAttempts => {
                write!(f, "objective attempt budget must be at least 1")
            }
            ConfigError::NoRoomForExit => write!(
                f,
                "exit room needs at least two building rows so it doesn't replace the entrance"
            ),
            ConfigError::StagingTooWide { half_width, width } => write!(
                f,
                "staging half width {} exceeds grid width {}",
                half_width, width
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a generator configuration, returning all errors found.
pub fn validate_config(config: &GeneratorConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.width == 0 {
        errors.push(ConfigError::ZeroWidth);
    }
    if config.zone_boundary_row == 0 || config.zone_boundary_row >= config.height {
        errors.push(ConfigError::BoundaryOutOfRange {
            row: config.zone_boundary_row,
            height: config.height,
        });
    }
    if !(0.0..=1.0).contains(&config.wall_chance) {
        errors.push(ConfigError::InvalidWallChance(config.wall_chance));
    }
    if config.objective_count > 0 && config.objective_attempts == 0 {
        errors.push(ConfigError::ZeroObjectiveAttempts);
    }
    if config.staging_half_width > config.width {
        errors.push(ConfigError::StagingTooWide {
            half_width: config.staging_half_width,
            width: config.width,
        });
    }
    if config.place_exit && config.height < config.zone_boundary_row.saturating_add(2) {
        errors.push(ConfigError::NoRoomForExit);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let errors = validate_config(&GeneratorConfig::default());
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn with_dimensions_keeps_other_defaults() {
        let c = GeneratorConfig::with_dimensions(9, 12, 4);
        assert_eq!((c.width, c.height, c.zone_boundary_row), (9, 12, 4));
        assert_eq!(c.objective_count, DEFAULT_OBJECTIVE_COUNT);
        assert_eq!(c.wall_chance, DEFAULT_WALL_CHANCE);
        assert_eq!(c.seed, None);
    }

    #[test]
    fn zero_width() {
        let c = GeneratorConfig {
            width: 0,
            ..Default::default()
        };
        assert!(validate_config(&c).contains(&ConfigError::ZeroWidth));
    }

    #[test]
    fn boundary_must_leave_both_zones() {
        for row in [0, 10, 11] {
            let c = GeneratorConfig {
                zone_boundary_row: row,
                ..Default::default()
            };
            assert!(
                validate_config(&c)
                    .iter()
                    .any(|e| matches!(e, ConfigError::BoundaryOutOfRange { .. })),
                "row {} should be rejected",
                row
            );
        }
    }

    #[test]
    fn wall_chance_range() {
        for p in [-0.1, 1.5, f64::NAN] {
            let c = GeneratorConfig {
                wall_chance: p,
                ..Default::default()
            };
            assert_eq!(validate_config(&c).len(), 1, "p = {}", p);
        }
        for p in [0.0, 1.0] {
            let c = GeneratorConfig {
                wall_chance: p,
                ..Default::default()
            };
            assert!(validate_config(&c).is_empty());
        }
    }

    #[test]
    fn staging_wider_than_grid_is_rejected() {
        let c = GeneratorConfig {
            staging_half_width: 1 << 31,
            seed: Some(1),
            ..Default::default()
        };
        assert_eq!(
            validate_config(&c),
            vec![ConfigError::StagingTooWide {
                half_width: 1 << 31,
                width: 7
            }]
        );

        // wider than needed is clamped to the grid
        for half_width in [3, 7] {
            let c = GeneratorConfig {
                staging_half_width: half_width,
                ..Default::default()
            };
            assert!(validate_config(&c).is_empty());
        }
    }

    #[test]
    fn exit_needs_two_building_rows() {
        let c = GeneratorConfig {
            height: 4,
            zone_boundary_row: 3,
            place_exit: true,
            ..Default::default()
        };
        assert_eq!(validate_config(&c), vec![ConfigError::NoRoomForExit]);
    }

    #[test]
    fn zero_attempts_only_matters_with_objectives() {
        let mut c = GeneratorConfig {
            objective_attempts: 0,
            ..Default::default()
        };
        assert_eq!(validate_config(&c), vec![ConfigError::ZeroObjectiveAttempts]);
        c.objective_count = 0;
        assert!(validate_config(&c).is_empty());
    }

    #[test]
    fn json_roundtrip_fills_missing_fields() {
        let c: GeneratorConfig = serde_json::from_str(r#"{"width": 9, "seed": 3}"#).unwrap();
        assert_eq!(c.width, 9);
        assert_eq!(c.seed, Some(3));
        assert_eq!(c.height, DEFAULT_HEIGHT);
    }
}
