//! Error types for the apartment accountant bot

use thiserror::Error;

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

/// Host-side failures: transport glue, session bookkeeping, rendering.
///
/// User input problems are NOT errors at this level. They are
/// [`crate::validators::ValidationError`] values consumed by the intake
/// state machine as same-stage re-prompts and never escape it.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
