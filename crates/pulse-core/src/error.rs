//! Error types for Pulse

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed field {domain}.{path}: {reason}")]
    Malformed {
        domain: String,
        path: String,
        reason: String,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Build a malformed-field error for `domain` at a dotted `path`
    pub fn malformed(
        domain: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::Malformed {
            domain: domain.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
