use std::time::Duration;
use thiserror::Error;

use crate::contact::ContactField;

/// The only failure a caller of the router ever sees.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("validation error: {0}")]
    Validation(String),
}

impl RouterError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Failure of the AI half of a tier. Always recovered by the local heuristic.
#[derive(Debug, Error)]
pub enum TierError {
    #[error("AI provider unavailable: {0}")]
    Unavailable(String),

    #[error("AI call timed out after {0:?}")]
    Timeout(Duration),

    #[error("AI output malformed: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("no valid form data provided")]
    Empty,

    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    #[error("{0} is not a valid phone number")]
    InvalidPhone(String),

    #[error("{field} exceeds {max} characters")]
    TooLong { field: ContactField, max: usize },

    #[error("invalid status {0:?}, must be one of: new, contacted, resolved")]
    InvalidStatus(String),
}
