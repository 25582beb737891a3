//! Error types for the task store and its helpers.

use thiserror::Error;

/// Errors raised by the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// A new task was submitted without every required field.
    #[error("Missing information: please fill out all required fields")]
    MissingInformation,

    /// User lookup returned no result.
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Unknown status '{0}' (expected open, in-progress or completed)")]
    UnknownStatus(String),

    /// A date string did not parse as `YYYY-MM-DD`.
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}
