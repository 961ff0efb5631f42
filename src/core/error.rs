//! Engine error type.
//!
//! Only construction can fail. Interaction mistakes (clicking a tile that
//! cannot move, hovering at the edge of the screen) are reported through
//! outcome enums instead, because they are expected user noise.

use thiserror::Error;

/// Result type alias for engine construction.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while setting up an engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A configuration value or injected content is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl EngineError {
    /// Create an invalid configuration error.
    #[inline]
    pub fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration(message.into())
    }
}
