//! Stages of the card and the progress indicator.

use serde::{Deserialize, Serialize};

/// One screen of the experience, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Sliding picture puzzle.
    Puzzle,
    /// Word unscramble.
    Scramble,
    /// The card with the evasive decline button.
    Valentine,
}

impl Stage {
    /// All stages, in order.
    pub const ALL: [Stage; 3] = [Stage::Puzzle, Stage::Scramble, Stage::Valentine];

    /// Position in [`Stage::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Stage::Puzzle => 0,
            Stage::Scramble => 1,
            Stage::Valentine => 2,
        }
    }

    /// The stage that follows this one.
    #[must_use]
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Puzzle => Some(Stage::Scramble),
            Stage::Scramble => Some(Stage::Valentine),
            Stage::Valentine => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Puzzle => "puzzle",
            Stage::Scramble => "scramble",
            Stage::Valentine => "valentine",
        };
        f.write_str(name)
    }
}

/// How a stage dot in the progress indicator is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageStatus {
    Completed,
    Current,
    Upcoming,
}

/// Progress indicator for `current`, one entry per stage in order.
#[must_use]
pub fn progress(current: Stage) -> [StageStatus; 3] {
    Stage::ALL.map(|stage| match stage.index().cmp(&current.index()) {
        std::cmp::Ordering::Less => StageStatus::Completed,
        std::cmp::Ordering::Equal => StageStatus::Current,
        std::cmp::Ordering::Greater => StageStatus::Upcoming,
    })
}
