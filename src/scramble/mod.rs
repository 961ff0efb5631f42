//! Word unscramble puzzle.
//!
//! The player drags words into order and presses "check". The starting
//! order is a uniform shuffle that is never the answer itself: if the
//! shuffle happens to match, the first and last words are swapped.

use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{EngineError, EngineResult, RandomSource, ScrambleConfig};

/// Result of checking the current order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CheckOutcome {
    /// The sentence is correct; the puzzle is now solved.
    Correct,
    /// Wrong order; try again.
    Incorrect,
    /// Checked after it was already solved; nothing changed.
    AlreadySolved,
}

/// A word scramble in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WordScramble {
    target: Vec<String>,
    words: Vec<String>,
    attempts: u32,
    hint_after: u32,
    solved: bool,
}

impl WordScramble {
    /// Scramble `target`.
    ///
    /// Needs at least two distinct words, otherwise every order is the answer.
    pub fn new<R, I, S>(target: I, hint_after: u32, rng: &mut R) -> EngineResult<Self>
    where
        R: RandomSource,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target: Vec<String> = target.into_iter().map(Into::into).collect();
        if target.len() < 2 {
            return Err(EngineError::invalid(format!(
                "scramble needs at least 2 words, got {}",
                target.len()
            )));
        }
        for (i, word) in target.iter().enumerate() {
            if target[..i].contains(word) {
                return Err(EngineError::invalid(format!(
                    "scramble words must be distinct, \"{word}\" repeats"
                )));
            }
        }

        let mut words = target.clone();
        rng.shuffle(&mut words);
        if words == target {
            let last = words.len() - 1;
            words.swap(0, last);
            trace!("shuffle matched the answer, swapped first and last");
        }

        Ok(Self {
            target,
            words,
            attempts: 0,
            hint_after,
            solved: false,
        })
    }

    /// Scramble the sentence from a config.
    pub fn from_config<R: RandomSource>(config: &ScrambleConfig, rng: &mut R) -> EngineResult<Self> {
        Self::new(config.sentence.split_whitespace(), config.hint_after, rng)
    }

    /// Words in their current order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The answer.
    #[must_use]
    pub fn target(&self) -> &[String] {
        &self.target
    }

    /// Number of checks so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Show the "it's a special question" hint?
    #[must_use]
    pub fn hint_visible(&self) -> bool {
        !self.solved && self.attempts > self.hint_after
    }

    /// Drag the word at `from` to position `to`.
    ///
    /// Returns `false` (and changes nothing) for out-of-range positions or
    /// once solved.
    pub fn move_word(&mut self, from: usize, to: usize) -> bool {
        if self.solved || from >= self.words.len() || to >= self.words.len() {
            return false;
        }
        let word = self.words.remove(from);
        self.words.insert(to, word);
        true
    }

    /// Replace the whole order, as a drag-and-drop list reports it.
    ///
    /// Rejected unless `order` is a permutation of the words.
    pub fn reorder(&mut self, order: Vec<String>) -> bool {
        if self.solved || order.len() != self.words.len() {
            return false;
        }
        let mut sorted_new = order.clone();
        let mut sorted_old = self.words.clone();
        sorted_new.sort();
        sorted_old.sort();
        if sorted_new != sorted_old {
            return false;
        }
        self.words = order;
        true
    }

    /// Check the current order.
    pub fn check_answer(&mut self) -> CheckOutcome {
        if self.solved {
            return CheckOutcome::AlreadySolved;
        }
        self.attempts += 1;
        if self.words == self.target {
            self.solved = true;
            debug!(attempts = self.attempts, "word scramble solved");
            CheckOutcome::Correct
        } else {
            trace!(attempts = self.attempts, "word scramble incorrect");
            CheckOutcome::Incorrect
        }
    }
}
