//! Sliding picture puzzle.
//!
//! - `board`: `TileBoard`, adjacency and solvability
//! - `engine`: `TilePuzzleEngine`, the configured entry point
//! - `solver`: breadth-first solver used for hints

pub mod board;
pub mod engine;
pub mod solver;

pub use board::{is_solvable, neighbors_of, Neighbors, SlideOutcome, SlideRejection, TileBoard};
pub use engine::{TilePuzzleEngine, HINT_STATE_BUDGET};
pub use solver::{hint, solve};
