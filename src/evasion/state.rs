//! Evasion state and the events that drive it.

use serde::{Deserialize, Serialize};

use crate::core::{Size, Vec2};

use super::phase::{EvasionPhase, PhaseTransition};

/// Everything the view layer needs to draw the decline and accept buttons.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvasionState {
    pub(crate) attempt_count: usize,
    pub(crate) phase: EvasionPhase,
    pub(crate) wander_escape_count: u32,
    pub(crate) position: Vec2,
    pub(crate) yes_emphasis: f64,
    pub(crate) accepted: bool,
}

impl EvasionState {
    pub(crate) fn new() -> Self {
        Self {
            attempt_count: 0,
            phase: EvasionPhase::Confined,
            wander_escape_count: 0,
            position: Vec2::ZERO,
            yes_emphasis: 1.0,
            accepted: false,
        }
    }

    /// Escapes so far, capped at `message_count - 1`. Selects the label.
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.attempt_count
    }

    #[must_use]
    pub fn phase(&self) -> EvasionPhase {
        self.phase
    }

    /// Escapes made while wandering.
    #[must_use]
    pub fn wander_escape_count(&self) -> u32 {
        self.wander_escape_count
    }

    /// Decline-button offset from the current phase's origin.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Scale for the accept button.
    #[must_use]
    pub fn yes_emphasis(&self) -> f64 {
        self.yes_emphasis
    }

    /// Has the accept action fired?
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Is the full-screen takeover showing?
    #[must_use]
    pub fn is_takeover(&self) -> bool {
        self.phase == EvasionPhase::Captured && !self.accepted
    }
}

/// Geometry measured by the view layer when the pointer came close.
///
/// All points share one coordinate system (e.g. client pixels).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProximityEvent {
    /// Pointer position.
    pub pointer: Vec2,
    /// Current centre of the decline button.
    pub button_center: Vec2,
    /// Size of the decline button.
    pub button_size: Size,
    /// Size of the zone the button lives in while confined.
    pub zone: Size,
    /// Zone centre minus viewport centre.
    pub zone_center: Vec2,
    /// Size of the viewport.
    pub viewport: Size,
}

/// What a proximity event did.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum ProximityOutcome {
    /// The button moved.
    Escaped {
        position: Vec2,
        transition: Option<PhaseTransition>,
    },
    /// The button is captured or the card was accepted; nothing changed.
    Ignored,
}

impl ProximityOutcome {
    /// Phase change caused by the event, if any.
    #[must_use]
    pub fn transition(&self) -> Option<PhaseTransition> {
        match self {
            ProximityOutcome::Escaped { transition, .. } => *transition,
            ProximityOutcome::Ignored => None,
        }
    }
}

/// What an accept request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AcceptOutcome {
    /// Accepted now, from the given phase.
    Accepted(EvasionPhase),
    /// Accepted earlier; nothing changed.
    AlreadyAccepted,
    /// A takeover click arrived before the button was captured.
    NotCaptured,
}
