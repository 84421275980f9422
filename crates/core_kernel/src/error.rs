//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid {kind} id: '{raw}'")]
    InvalidIdentifier {
        kind: &'static str,
        raw: String,
    },
}

impl CoreError {
    pub fn invalid_identifier(kind: &'static str, raw: impl Into<String>) -> Self {
        CoreError::InvalidIdentifier {
            kind,
            raw: raw.into(),
        }
    }
}
