//! Escalating decline-button labels.

use crate::core::{EngineError, EngineResult};

/// Labels shown on the decline button, one per attempt.
pub const DEFAULT_DECLINE_MESSAGES: [&str; 15] = [
    "No",
    "Are you sure?",
    "Really sure?",
    "Think again!",
    "Last chance!",
    "Surely not?",
    "You might regret this!",
    "Give it another thought!",
    "Are you kidding?",
    "Wrong answer!",
    "Try again!",
    "Nope, wrong button!",
    "Come on...",
    "I'll be sad 🥺",
    "Pretty please?",
];

/// Validated, non-empty list of decline messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageDeck {
    messages: Vec<String>,
}

impl MessageDeck {
    /// Build a deck that covers `message_count` attempts.
    pub fn new<I, S>(messages: I, message_count: usize) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            return Err(EngineError::invalid("decline message list is empty"));
        }
        if messages.len() < message_count {
            return Err(EngineError::invalid(format!(
                "need at least {message_count} decline messages, got {}",
                messages.len()
            )));
        }
        Ok(Self { messages })
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message for an attempt count, saturating at the last message.
    #[must_use]
    pub fn get(&self, attempt: usize) -> &str {
        self.messages
            .get(attempt)
            .or_else(|| self.messages.last())
            .map_or("", String::as_str)
    }
}

impl Default for MessageDeck {
    fn default() -> Self {
        Self {
            messages: DEFAULT_DECLINE_MESSAGES.iter().map(|m| (*m).to_string()).collect(),
        }
    }
}
