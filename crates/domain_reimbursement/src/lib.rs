//! Reimbursement Domain
//!
//! This crate holds everything the reimbursement tracker knows about its one
//! entity, independent of how it is stored or served:
//!
//! - **Model**: `Reimbursement` and the client-supplied `ReimbursementCandidate`
//! - **Validation**: the id predicate and candidate rules
//! - **Port**: the storage interface the service depends on
//! - **Service**: validation before delegation, and translation of storage
//!   outcomes into `BadRequest` / `ResourceNotFound` / `InternalServerError`
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_reimbursement::{ReimbursementService, MockReimbursementPort};
//!
//! let service = ReimbursementService::new(Arc::new(MockReimbursementPort::new()));
//! let err = service.get_reimbursement_by_id("0").await.unwrap_err();
//! assert!(err.is_bad_request());
//! ```

pub mod reimbursement;
pub mod error;
pub mod validation;
pub mod ports;
pub mod service;

pub use reimbursement::{
    Reimbursement, ReimbursementCandidate, ReimbursementStatus, ReimbursementType,
};
pub use error::ReimbursementError;
pub use validation::{ReimbursementValidator, ValidationResult};
pub use ports::ReimbursementPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockReimbursementPort;
pub use service::ReimbursementService;
