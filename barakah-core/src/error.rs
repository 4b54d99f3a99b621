//! Error types for the goal subsystem.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoalError {
    /// Malformed input to a pure function (zero timeframe, task index out of range, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt goal record: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("unsupported goal record version {0}")]
    UnsupportedVersion(u32),

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl GoalError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        GoalError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GoalError>;
