//! Stage progression, timers and the letter reveal.
//!
//! - `scheduler`: cancellable fire-once timers on a caller-driven clock
//! - `stage`: `Stage` and the progress indicator
//! - `letter`: envelope/letter state machine
//! - `sequencer`: `StageSequencer`, which owns the engines and the timers

pub mod letter;
pub mod scheduler;
pub mod sequencer;
pub mod stage;

pub use letter::{LetterReveal, LetterState};
pub use scheduler::{Millis, Scheduler, TaskId};
pub use sequencer::{FlowEvent, FlowTimer, StageSequencer};
pub use stage::{progress, Stage, StageStatus};
