//! Infrastructure Database Layer
//!
//! This crate provides PostgreSQL persistence for reimbursements using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. `ReimbursementRepository` is the
//! only place SQL text lives, and it implements the domain's
//! `ReimbursementPort` so the service never sees a database type.
//!
//! Connections are reached through the `ConnectionPool` trait. Each repository
//! operation checks out exactly one `PooledConnection`, which goes back to the
//! pool when dropped, on success and failure alike.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PgConnectionPool, ReimbursementRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/reimbursements")).await?;
//! let repo = ReimbursementRepository::new(PgConnectionPool::new(pool));
//! ```

pub mod pool;
pub mod error;
pub mod mapper;
pub mod repositories;

pub use pool::{
    create_pool, ConnectionPool, DatabaseConfig, DatabasePool, PgConnectionPool,
    PgPooledConnection, PooledConnection, SqlParam, Statement,
};
pub use error::DatabaseError;
pub use mapper::{map_reimbursement_row, ReimbursementRow};
pub use repositories::ReimbursementRepository;
