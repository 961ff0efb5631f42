//! Envelope and letter reveal.
//!
//! Opening shows the envelope first and the letter a moment later; closing
//! hides the letter first and the envelope a moment later. The delays are
//! owned by the sequencer; this type only knows which moves are legal.

use serde::{Deserialize, Serialize};

/// Where the envelope animation is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterState {
    /// Only the "open my letter" button is visible.
    #[default]
    Closed,
    /// Envelope shown, letter not yet.
    Opening,
    /// Envelope and letter shown.
    Open,
    /// Letter hidden, envelope on its way out.
    Closing,
}

/// Letter reveal state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LetterReveal {
    state: LetterState,
}

impl LetterReveal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> LetterState {
        self.state
    }

    /// Is the envelope overlay on screen?
    #[must_use]
    pub fn is_envelope_visible(&self) -> bool {
        self.state != LetterState::Closed
    }

    /// Is the letter itself readable?
    #[must_use]
    pub fn is_letter_visible(&self) -> bool {
        self.state == LetterState::Open
    }

    /// `Closed -> Opening`. Also reopens an envelope that is closing.
    pub fn open(&mut self) -> bool {
        match self.state {
            LetterState::Closed | LetterState::Closing => {
                self.state = LetterState::Opening;
                true
            }
            LetterState::Opening | LetterState::Open => false,
        }
    }

    /// `Opening -> Open`, when the letter delay elapses.
    pub fn reveal(&mut self) -> bool {
        self.step(LetterState::Opening, LetterState::Open)
    }

    /// `Opening | Open -> Closing`.
    pub fn close(&mut self) -> bool {
        match self.state {
            LetterState::Opening | LetterState::Open => {
                self.state = LetterState::Closing;
                true
            }
            LetterState::Closed | LetterState::Closing => false,
        }
    }

    /// `Closing -> Closed`, when the close delay elapses.
    pub fn finish_close(&mut self) -> bool {
        self.step(LetterState::Closing, LetterState::Closed)
    }

    fn step(&mut self, from: LetterState, to: LetterState) -> bool {
        if self.state == from {
            self.state = to;
            true
        } else {
            false
        }
    }
}
