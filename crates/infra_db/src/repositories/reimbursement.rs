//! Reimbursement repository implementation
//!
//! This module is the sole owner of the `app_reimbursements` SQL. Every
//! operation checks out one connection, runs its statements on it in order,
//! and lets the connection drop on the way out.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, instrument};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, ReimbursementId,
    UserId,
};
use domain_reimbursement::{Reimbursement, ReimbursementCandidate, ReimbursementPort};

use crate::error::DatabaseError;
use crate::mapper::map_reimbursement_row;
use crate::pool::{ConnectionPool, PgConnectionPool, PooledConnection, SqlParam, Statement};

/// SQL text for every reimbursement statement
pub mod sql {
    pub const SELECT_ALL: &str = r#"
        SELECT id, amount, submitted, resolved, description, receipt,
               author_id, resolver_id, reimb_status_id, reimb_type_id
        FROM app_reimbursements
        ORDER BY id
    "#;

    pub const SELECT_BY_AUTHOR: &str = r#"
        SELECT id, amount, submitted, resolved, description, receipt,
               author_id, resolver_id, reimb_status_id, reimb_type_id
        FROM app_reimbursements
        WHERE author_id = $1
        ORDER BY id
    "#;

    pub const SELECT_BY_ID: &str = r#"
        SELECT id, amount, submitted, resolved, description, receipt,
               author_id, resolver_id, reimb_status_id, reimb_type_id
        FROM app_reimbursements
        WHERE id = $1
    "#;

    /// `$1` amount, `$2` submitted, `$3` description, `$4` author,
    /// `$5` status, `$6` type
    pub const INSERT: &str = r#"
        INSERT INTO app_reimbursements (
            amount, submitted, resolved, description, receipt,
            author_id, resolver_id, reimb_status_id, reimb_type_id
        )
        VALUES ($1, $2, NULL, $3, NULL, $4, NULL, $5, $6)
        RETURNING id, amount, submitted, resolved, description, receipt,
                  author_id, resolver_id, reimb_status_id, reimb_type_id
    "#;

    /// `$1` id, `$2` amount, `$3` submitted, `$4` resolved, `$5` description,
    /// `$6` author, `$7` resolver, `$8` status, `$9` type
    ///
    /// `resolved` is never written as null: an update is a resolution, so an
    /// omitted resolution time is stamped with the current time.
    pub const UPDATE: &str = r#"
        UPDATE app_reimbursements
        SET amount = $2,
            submitted = $3,
            resolved = $4,
            description = $5,
            receipt = NULL,
            author_id = $6,
            resolver_id = $7,
            reimb_status_id = $8,
            reimb_type_id = $9
        WHERE id = $1
    "#;

    pub const DELETE: &str = "DELETE FROM app_reimbursements WHERE id = $1";

    pub const PING: &str = "SELECT 1";
}

/// Repository for reimbursement rows
///
/// Generic over the pool so tests can count connection checkouts; production
/// code uses the `PgConnectionPool` default.
#[derive(Debug, Clone)]
pub struct ReimbursementRepository<P = PgConnectionPool> {
    pool: P,
}

impl<P: ConnectionPool> ReimbursementRepository<P> {
    /// Creates a new ReimbursementRepository over the given pool
    pub fn new(pool: P) -> Self {
        Self { pool }
    }

    /// Returns a reference to the pool
    pub fn pool(&self) -> &P {
        &self.pool
    }

    async fn connect(&self) -> Result<P::Connection, PortError> {
        self.pool.connect().await.map_err(storage_fault)
    }
}

/// Logs a storage fault and converts it for the port boundary
///
/// Connection-class faults stay distinguishable as `PortError::Connection`;
/// the `DatabaseError` itself is kept as the source either way.
fn storage_fault(e: DatabaseError) -> PortError {
    error!(error = %e, "Reimbursement storage operation failed");
    let port_error = if e.is_connection_error() {
        PortError::connection("Database unavailable")
    } else {
        PortError::internal("Database operation failed")
    };
    port_error.with_source(e)
}

fn select_by_id(id: ReimbursementId) -> Statement {
    Statement::new(sql::SELECT_BY_ID).bind(SqlParam::Int(id.get()))
}

impl<P: ConnectionPool> DomainPort for ReimbursementRepository<P> {}

#[async_trait]
impl<P: ConnectionPool> HealthCheckable for ReimbursementRepository<P> {
    /// Checks out a connection and runs `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        let result = match self.pool.connect().await {
            Ok(mut conn) => conn.execute(&Statement::new(sql::PING)).await,
            Err(e) => Err(e),
        };

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: "postgres-reimbursement-repository".to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl<P: ConnectionPool> ReimbursementPort for ReimbursementRepository<P> {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Reimbursement>, PortError> {
        debug!("Fetching all reimbursements");

        let mut conn = self.connect().await?;
        let rows = conn
            .fetch(&Statement::new(sql::SELECT_ALL))
            .await
            .map_err(storage_fault)?;

        debug!(count = rows.len(), "Fetched reimbursements");
        Ok(rows.into_iter().map(Reimbursement::from).collect())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn get_all_by_user(&self, user_id: UserId) -> Result<Vec<Reimbursement>, PortError> {
        debug!("Fetching reimbursements by author");

        let mut conn = self.connect().await?;
        let statement = Statement::new(sql::SELECT_BY_AUTHOR).bind(SqlParam::Int(user_id.get()));
        let rows = conn.fetch(&statement).await.map_err(storage_fault)?;

        Ok(rows.into_iter().map(Reimbursement::from).collect())
    }

    #[instrument(skip(self), fields(reimbursement_id = %id))]
    async fn get_by_id(&self, id: ReimbursementId) -> Result<Option<Reimbursement>, PortError> {
        debug!("Fetching reimbursement by ID");

        let mut conn = self.connect().await?;
        let rows = conn.fetch(&select_by_id(id)).await.map_err(storage_fault)?;

        Ok(map_reimbursement_row(rows.into_iter().next()))
    }

    #[instrument(skip(self, candidate), fields(author_id = %candidate.author_id))]
    async fn submit(&self, candidate: &ReimbursementCandidate) -> Result<Reimbursement, PortError> {
        debug!("Inserting reimbursement");

        let mut conn = self.connect().await?;
        let statement = Statement::new(sql::INSERT)
            .bind(SqlParam::Decimal(candidate.amount))
            .bind(SqlParam::Timestamp(Utc::now().naive_utc()))
            .bind(SqlParam::Text(candidate.description.clone()))
            .bind(SqlParam::Int(candidate.author_id.get()))
            .bind(SqlParam::Int(candidate.reimb_status_id))
            .bind(SqlParam::Int(candidate.reimb_type_id));

        let row = conn
            .fetch(&statement)
            .await
            .map_err(storage_fault)?
            .into_iter()
            .next()
            .ok_or_else(|| PortError::internal("Insert returned no row"))?;

        debug!(reimbursement_id = row.id, "Reimbursement inserted");
        Ok(Reimbursement::from(row))
    }

    #[instrument(skip(self, candidate), fields(reimbursement_id = %id))]
    async fn update(
        &self,
        id: ReimbursementId,
        candidate: &ReimbursementCandidate,
    ) -> Result<bool, PortError> {
        debug!("Updating reimbursement");

        let mut conn = self.connect().await?;

        let existing = conn.fetch(&select_by_id(id)).await.map_err(storage_fault)?;
        let Some(existing) = map_reimbursement_row(existing.into_iter().next()) else {
            debug!("No reimbursement to update");
            return Ok(false);
        };

        let resolved = candidate
            .resolved
            .unwrap_or_else(|| Utc::now().naive_utc());

        let statement = Statement::new(sql::UPDATE)
            .bind(SqlParam::Int(id.get()))
            .bind(SqlParam::Decimal(candidate.amount))
            .bind(SqlParam::Timestamp(existing.submitted))
            .bind(SqlParam::OptTimestamp(Some(resolved)))
            .bind(SqlParam::Text(candidate.description.clone()))
            .bind(SqlParam::Int(candidate.author_id.get()))
            .bind(SqlParam::OptInt(candidate.resolver_id.map(UserId::get)))
            .bind(SqlParam::Int(candidate.reimb_status_id))
            .bind(SqlParam::Int(candidate.reimb_type_id));

        let affected = conn.execute(&statement).await.map_err(storage_fault)?;
        if affected == 0 {
            debug!("Reimbursement vanished before update");
        }

        Ok(affected > 0)
    }

    #[instrument(skip(self), fields(reimbursement_id = %id))]
    async fn delete_by_id(&self, id: ReimbursementId) -> Result<bool, PortError> {
        debug!("Deleting reimbursement");

        let mut conn = self.connect().await?;
        let statement = Statement::new(sql::DELETE).bind(SqlParam::Int(id.get()));
        let affected = conn.execute(&statement).await.map_err(storage_fault)?;

        debug!(affected, "Delete complete");
        Ok(true)
    }
}
