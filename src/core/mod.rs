//! Shared building blocks: geometry, randomness, configuration, errors.
//!
//! Nothing in here knows about a particular mini-game.

pub mod config;
pub mod error;
pub mod geometry;
pub mod rng;

pub use config::{EvasionConfig, FlowConfig, PuzzleConfig, ScrambleConfig};
pub use error::{EngineError, EngineResult};
pub use geometry::{clamp_offset, Size, Vec2};
pub use rng::{GameRng, RandomSource};
