//! Repository implementations for domain entities
//!
//! Repositories encapsulate SQL text and map between database rows and
//! domain types. Each one implements its domain's port trait directly.

pub mod reimbursement;

pub use reimbursement::ReimbursementRepository;
