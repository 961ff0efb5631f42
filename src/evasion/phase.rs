//! Evasion phases.

use serde::{Deserialize, Serialize};

/// How far the decline button may roam.
///
/// Phases only ever advance: `Confined -> Wandering -> Captured`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EvasionPhase {
    /// Inside the button zone; offsets are relative to the zone centre.
    #[default]
    Confined,
    /// Anywhere on screen; offsets are relative to the viewport centre.
    Wandering,
    /// Caught. The accept action takes over the screen and the button
    /// no longer moves.
    Captured,
}

impl EvasionPhase {
    /// The phase after this one, if any.
    #[must_use]
    pub fn next(self) -> Option<EvasionPhase> {
        match self {
            EvasionPhase::Confined => Some(EvasionPhase::Wandering),
            EvasionPhase::Wandering => Some(EvasionPhase::Captured),
            EvasionPhase::Captured => None,
        }
    }

    /// Does the button still react to the pointer?
    #[must_use]
    pub fn is_evasive(self) -> bool {
        self != EvasionPhase::Captured
    }
}

impl std::fmt::Display for EvasionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EvasionPhase::Confined => "confined",
            EvasionPhase::Wandering => "wandering",
            EvasionPhase::Captured => "captured",
        };
        f.write_str(name)
    }
}

/// A phase change caused by one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: EvasionPhase,
    pub to: EvasionPhase,
}
