//! Generation errors.
//!
//! Every variant aborts the whole `generate` call; no partial grid is ever
//! returned. Retry policy belongs to the caller.

use crate::config::ConfigError;
use crate::grid::Coord;
use crate::validation::ValidationError;

/// Errors that can occur while generating a level.
#[derive(Debug, Clone)]
pub enum GenerationError {
    /// The configuration was rejected before any work was done.
    InvalidConfig(Vec<ConfigError>),
    /// A randomized feature could not be placed within its attempt budget.
    /// Recoverable by regenerating with a fresh seed.
    PlacementExhausted {
        feature: &'static str,
        index: usize,
        attempts: u32,
    },
    /// Reachability repair ran out of carves with cells still unreached.
    ConnectivityRepairExhausted { unreached: Vec<Coord>, carved: u32 },
    /// A finished grid failed its final invariant check.
    InvariantViolation(Vec<ValidationError>),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::InvalidConfig(errors) => {
                write!(f, "invalid generator config: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
            GenerationError::PlacementExhausted {
                feature,
                index,
                attempts,
            } => write!(
                f,
                "could not place {} #{} within {} attempts",
                feature, index, attempts
            ),
            GenerationError::ConnectivityRepairExhausted { unreached, carved } => write!(
                f,
                "reachability repair gave up after carving {} doors; {} cells still unreached (first: {})",
                carved,
                unreached.len(),
                unreached
                    .first()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".into())
            ),
            GenerationError::InvariantViolation(violations) => {
                write!(f, "generated grid violates {} invariant(s)", violations.len())?;
                if let Some(first) = violations.first() {
                    write!(f, ": {}", first.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<Vec<ConfigError>> for GenerationError {
    fn from(errors: Vec<ConfigError>) -> Self {
        GenerationError::InvalidConfig(errors)
    }
}

impl GenerationError {
    /// True if a fresh regeneration has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GenerationError::InvalidConfig(_))
    }
}
