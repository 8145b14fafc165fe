//! Error types for the node player core.

/// Errors surfaced by the player core.
///
/// Only [`PlayerError::EmptyFlow`] can be raised by route resolution; everything else is reported
/// while loading or validating configuration. Soft anomalies (orphaned triggers, unmatched
/// annotated positions, ...) never become errors, they are logged and ignored.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerError {
    /// The flow yields no first node, so a route without a node code cannot be resolved.
    #[error("cannot detect route node: the node flow is empty")]
    EmptyFlow,

    /// A node code that has no node configuration was looked up directly.
    #[error("unknown node '{code}'")]
    UnknownNode { code: String },

    /// Configuration could not be decoded (malformed JSON, unknown `type` discriminant, ...).
    #[error("config error: {0}")]
    Config(String),

    /// Configuration decoded but is unusable.
    #[error("validation error: {0}")]
    Validation(String),
}

impl PlayerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Only an empty flow stops the player; every other failure leaves the last good state.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::EmptyFlow)
    }
}

impl From<serde_json::Error> for PlayerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used across the player core.
pub type PlayerResult<T> = Result<T, PlayerError>;
