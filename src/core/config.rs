//! Engine configuration.
//!
//! Hosts configure the engines at startup by providing:
//! - `PuzzleConfig`: sliding puzzle size and shuffle depth
//! - `EvasionConfig`: decline-button tuning
//! - `ScrambleConfig`: the hidden sentence and hint threshold
//! - `FlowConfig`: combines all of the above with stage timings
//!
//! Every struct has sensible defaults, `with_*` builders and serde support,
//! so a host can ship them as JSON next to its assets.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};

/// Sliding tile puzzle configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Tiles per row and column. Must be at least 2.
    pub grid_size: usize,

    /// Random legal slides applied to the solved board when shuffling.
    pub shuffle_moves: usize,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            grid_size: 2,
            shuffle_moves: 100,
        }
    }
}

impl PuzzleConfig {
    /// Set the grid size.
    #[must_use]
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the number of shuffle moves.
    #[must_use]
    pub fn with_shuffle_moves(mut self, moves: usize) -> Self {
        self.shuffle_moves = moves;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> EngineResult<()> {
        if self.grid_size < 2 {
            return Err(EngineError::invalid(format!(
                "grid size must be at least 2, got {}",
                self.grid_size
            )));
        }
        // Tiles are addressed by usize and the blank is `n - 1`.
        if self.grid_size.checked_mul(self.grid_size).is_none() {
            return Err(EngineError::invalid("grid size overflows tile count"));
        }
        Ok(())
    }
}

/// Decline-button ("No") evasion configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasionConfig {
    /// Number of escalating messages; attempts cap at `message_count - 1`.
    pub message_count: usize,

    /// Escapes while wandering before the button is captured.
    pub wander_limit: u32,

    /// Pointer distance below which the caller should report proximity.
    pub proximity_threshold: f64,

    /// Base distance of one escape.
    pub min_move: f64,

    /// Random extra distance, uniform in `[0, move_jitter)`.
    pub move_jitter: f64,

    /// Extra distance while wandering the viewport.
    pub wander_bonus: f64,

    /// Gap kept between the button and the edge of its bounds.
    pub edge_margin: f64,

    /// Growth of the accept button per escape.
    pub emphasis_step: f64,

    /// Largest accept-button scale.
    pub emphasis_max: f64,
}

impl Default for EvasionConfig {
    fn default() -> Self {
        Self {
            message_count: 15,
            wander_limit: 8,
            proximity_threshold: 100.0,
            min_move: 100.0,
            move_jitter: 50.0,
            wander_bonus: 50.0,
            edge_margin: 10.0,
            emphasis_step: 0.08,
            emphasis_max: 2.0,
        }
    }
}

impl EvasionConfig {
    /// Set the message count.
    #[must_use]
    pub fn with_message_count(mut self, count: usize) -> Self {
        self.message_count = count;
        self
    }

    /// Set the wander limit.
    #[must_use]
    pub fn with_wander_limit(mut self, limit: u32) -> Self {
        self.wander_limit = limit;
        self
    }

    /// Set the escape distance range.
    #[must_use]
    pub fn with_move_range(mut self, min_move: f64, jitter: f64) -> Self {
        self.min_move = min_move;
        self.move_jitter = jitter;
        self
    }

    /// Set the proximity threshold.
    #[must_use]
    pub fn with_proximity_threshold(mut self, threshold: f64) -> Self {
        self.proximity_threshold = threshold;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> EngineResult<()> {
        if self.message_count == 0 {
            return Err(EngineError::invalid("message count must be at least 1"));
        }
        if self.wander_limit == 0 {
            return Err(EngineError::invalid("wander limit must be at least 1"));
        }
        let non_negative = [
            ("proximity_threshold", self.proximity_threshold),
            ("min_move", self.min_move),
            ("move_jitter", self.move_jitter),
            ("wander_bonus", self.wander_bonus),
            ("edge_margin", self.edge_margin),
            ("emphasis_step", self.emphasis_step),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::invalid(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if !self.emphasis_max.is_finite() || self.emphasis_max < 1.0 {
            return Err(EngineError::invalid(format!(
                "emphasis_max must be at least 1.0, got {}",
                self.emphasis_max
            )));
        }
        Ok(())
    }
}

/// Word scramble configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleConfig {
    /// Sentence to unscramble, split on whitespace.
    pub sentence: String,

    /// Failed checks after which the hint is shown.
    pub hint_after: u32,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            sentence: "WILL YOU BE MY VALENTINE".to_string(),
            hint_after: 2,
        }
    }
}

impl ScrambleConfig {
    /// Set the sentence.
    #[must_use]
    pub fn with_sentence(mut self, sentence: impl Into<String>) -> Self {
        self.sentence = sentence.into();
        self
    }

    /// Set the hint threshold.
    #[must_use]
    pub fn with_hint_after(mut self, attempts: u32) -> Self {
        self.hint_after = attempts;
        self
    }
}

/// Complete flow configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Seed for every random stream in the flow.
    pub seed: u64,

    pub puzzle: PuzzleConfig,
    pub scramble: ScrambleConfig,
    pub evasion: EvasionConfig,

    /// Decline-button messages. Must hold at least `evasion.message_count`.
    pub decline_messages: Vec<String>,

    /// Text revealed in the letter after acceptance.
    pub letter_text: String,

    /// How long a solved stage shows its "Perfect!" overlay.
    pub completion_delay_ms: u64,

    /// Pause between leaving one stage and entering the next.
    pub transition_delay_ms: u64,

    /// How long "try again" feedback stays up after a wrong answer.
    pub feedback_delay_ms: u64,

    /// Envelope-open to letter-visible delay.
    pub letter_delay_ms: u64,

    /// Letter-hidden to envelope-closed delay.
    pub close_delay_ms: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            puzzle: PuzzleConfig::default(),
            scramble: ScrambleConfig::default(),
            evasion: EvasionConfig::default(),
            decline_messages: crate::evasion::DEFAULT_DECLINE_MESSAGES
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
            letter_text: "Your special message will go here...".to_string(),
            completion_delay_ms: 1500,
            transition_delay_ms: 500,
            feedback_delay_ms: 1000,
            letter_delay_ms: 600,
            close_delay_ms: 300,
        }
    }
}

impl FlowConfig {
    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the puzzle configuration.
    #[must_use]
    pub fn with_puzzle(mut self, puzzle: PuzzleConfig) -> Self {
        self.puzzle = puzzle;
        self
    }

    /// Set the scramble configuration.
    #[must_use]
    pub fn with_scramble(mut self, scramble: ScrambleConfig) -> Self {
        self.scramble = scramble;
        self
    }

    /// Set the evasion configuration.
    #[must_use]
    pub fn with_evasion(mut self, evasion: EvasionConfig) -> Self {
        self.evasion = evasion;
        self
    }

    /// Replace the decline messages.
    #[must_use]
    pub fn with_decline_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decline_messages = messages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the letter text.
    #[must_use]
    pub fn with_letter_text(mut self, text: impl Into<String>) -> Self {
        self.letter_text = text.into();
        self
    }

    /// Total delay between solving a stage and entering the next one.
    #[must_use]
    pub fn advance_delay_ms(&self) -> u64 {
        self.completion_delay_ms.saturating_add(self.transition_delay_ms)
    }
}
