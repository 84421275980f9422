//! Reimbursement domain errors
//!
//! The service speaks in three kinds only. `BadRequest` and `ResourceNotFound`
//! are judgments the service makes itself; `InternalServerError` wraps whatever
//! the storage port reported, keeping it as the error source.

use thiserror::Error;

use core_kernel::{CoreError, PortError};

/// Errors that can occur in the reimbursement domain
#[derive(Debug, Error)]
pub enum ReimbursementError {
    /// Caller-supplied identifier or object failed validation
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A lookup or list yielded nothing when something was expected
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// The storage layer failed
    #[error("Internal server error")]
    InternalServerError(#[from] PortError),
}

impl ReimbursementError {
    /// Creates a BadRequest error with a message
    pub fn bad_request(message: impl Into<String>) -> Self {
        ReimbursementError::BadRequest(message.into())
    }

    /// Creates a ResourceNotFound error with a message
    pub fn not_found(message: impl Into<String>) -> Self {
        ReimbursementError::ResourceNotFound(message.into())
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self, ReimbursementError::BadRequest(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReimbursementError::ResourceNotFound(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ReimbursementError::InternalServerError(_))
    }
}

impl From<CoreError> for ReimbursementError {
    fn from(error: CoreError) -> Self {
        ReimbursementError::BadRequest(error.to_string())
    }
}
