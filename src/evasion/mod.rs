//! The uncooperative decline button.
//!
//! - `phase`: `EvasionPhase` and transitions
//! - `state`: `EvasionState`, input events and outcomes
//! - `messages`: escalating button labels
//! - `engine`: `EvasionEngine`, the transition functions

pub mod engine;
pub mod messages;
pub mod phase;
pub mod state;

pub use engine::{EvasionEngine, FALLBACK_DIRECTION, STATUS_SHY, STATUS_UNTOUCHED};
pub use messages::{MessageDeck, DEFAULT_DECLINE_MESSAGES};
pub use phase::{EvasionPhase, PhaseTransition};
pub use state::{AcceptOutcome, EvasionState, ProximityEvent, ProximityOutcome};
