//! Core Kernel - Foundational types for the reimbursement tracker
//!
//! This crate provides the building blocks shared by every layer:
//! - Integer identifiers with the id validity predicate
//! - The port error type and health check abstractions used by adapters
//! - The kernel error type

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{ReimbursementId, UserId, is_valid_id, parse_raw_id};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
