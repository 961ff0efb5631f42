//! # valentine-engine
//!
//! Rendering-agnostic engines for a Valentine greeting card: a sliding
//! picture puzzle and a word scramble gate a "will you be my Valentine"
//! card whose decline button refuses to be clicked.
//!
//! ## Design Principles
//!
//! 1. **State + transitions**: every engine is an explicit state object and
//!    a set of transition functions. View layers read state and render it
//!    however they like.
//!
//! 2. **Injected randomness and time**: engines take a `RandomSource`; the
//!    sequencer takes the current time. Nothing reads ambient clocks or
//!    global RNGs, so every run is reproducible from a seed.
//!
//! 3. **Mistakes are not errors**: only construction can fail. Clicking the
//!    wrong tile or chasing the button off-screen yields an outcome value.
//!
//! ## Modules
//!
//! - `core`: geometry, RNG, configuration, errors
//! - `puzzle`: sliding tile board, shuffle, solver
//! - `evasion`: the evasive decline button
//! - `scramble`: word unscramble puzzle
//! - `flow`: stage sequencing, timers, letter reveal

pub mod core;
pub mod evasion;
pub mod flow;
pub mod puzzle;
pub mod scramble;

// Re-export commonly used types
pub use crate::core::{
    EngineError, EngineResult, EvasionConfig, FlowConfig, GameRng, PuzzleConfig, RandomSource,
    ScrambleConfig, Size, Vec2,
};

pub use crate::puzzle::{neighbors_of, SlideOutcome, SlideRejection, TileBoard, TilePuzzleEngine};

pub use crate::evasion::{
    AcceptOutcome, EvasionEngine, EvasionPhase, EvasionState, MessageDeck, PhaseTransition,
    ProximityEvent, ProximityOutcome,
};

pub use crate::scramble::{CheckOutcome, WordScramble};

pub use crate::flow::{
    FlowEvent, LetterReveal, LetterState, Millis, Scheduler, Stage, StageSequencer, StageStatus,
    TaskId,
};
