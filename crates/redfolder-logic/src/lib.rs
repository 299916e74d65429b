//! Procedural level generation for Red Folder.
//!
//! This crate builds the room grid a play session runs on and nothing else:
//! no rendering, no input, no timers. Functions take plain data and return
//! results, so every phase is unit-testable on its own and the whole
//! pipeline is deterministic under a fixed seed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`allocator`] | Phase 1: room per cell, types by zone, closed boundaries |
//! | [`carver`] | Phase 2: objective placement and boundary carving |
//! | [`config`] | Generator settings and their validation |
//! | [`constants`] | Default dimensions, probabilities, budgets, objective names |
//! | [`error`] | `GenerationError` and retryability |
//! | [`generator`] | The full pipeline plus the stock retry policy |
//! | [`grid`] | Coordinates, boundaries, rooms and the grid arena |
//! | [`render`] | ASCII map for terminals and test output |
//! | [`repair`] | Phase 3: BFS reachability and door carving |
//! | [`rng`] | Seeded ChaCha RNG and per-attempt seed derivation |
//! | [`session`] | Folder pickup and restart over one generated level |
//! | [`theme`] | Per-room-type name, colour and textures |
//! | [`validation`] | Invariant checks over finished grids |
//! | [`zones`] | Staging/building zone geometry |
//!
//! ```
//! use redfolder_logic::{generate_with_config, GeneratorConfig, RoomType};
//!
//! let grid = generate_with_config(&GeneratorConfig::default().with_seed(42)).unwrap();
//! assert_eq!(grid.rooms_of_type(RoomType::Start).count(), 1);
//! assert_eq!(grid.objectives().count(), 3);
//! ```

pub mod allocator;
pub mod carver;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod grid;
pub mod render;
pub mod repair;
pub mod rng;
pub mod session;
pub mod theme;
pub mod validation;
pub mod zones;

pub use config::{validate_config, ConfigError, GeneratorConfig};
pub use error::GenerationError;
pub use generator::{
    generate, generate_level, generate_with_config, generate_with_retries, generate_with_rng,
    GeneratedLevel,
};
pub use grid::{Boundary, Coord, Direction, Grid, Item, Room, RoomId, RoomType};
pub use session::Session;
