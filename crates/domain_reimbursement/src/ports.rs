//! Reimbursement Domain Ports
//!
//! This module defines the storage port the reimbursement service depends on.
//! The service receives it as `Arc<dyn ReimbursementPort>`, so the PostgreSQL
//! repository in `infra_db` and the in-memory mock below are interchangeable.
//!
//! # Contract
//!
//! - Ports never produce "bad request" or "not found" errors. Absence is
//!   `Ok(None)` or an empty vector; every failure is a `PortError`.
//! - Ports are only ever called with ids that passed validation.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, ReimbursementId, UserId};

use crate::reimbursement::{Reimbursement, ReimbursementCandidate};

/// The storage port for reimbursements
#[async_trait]
pub trait ReimbursementPort: DomainPort + HealthCheckable {
    /// Retrieves every reimbursement in storage order
    async fn get_all(&self) -> Result<Vec<Reimbursement>, PortError>;

    /// Retrieves the reimbursements authored by `user_id`
    async fn get_all_by_user(&self, user_id: UserId) -> Result<Vec<Reimbursement>, PortError>;

    /// Retrieves a reimbursement by id
    ///
    /// # Returns
    ///
    /// `None` if no row has that id
    async fn get_by_id(&self, id: ReimbursementId) -> Result<Option<Reimbursement>, PortError>;

    /// Persists a new reimbursement, stamping `submitted` with the current time
    ///
    /// # Returns
    ///
    /// The persisted record including its storage-assigned id
    async fn submit(&self, candidate: &ReimbursementCandidate) -> Result<Reimbursement, PortError>;

    /// Replaces the mutable fields of reimbursement `id`, preserving `submitted`
    ///
    /// A candidate without a `resolved` time is stamped with the current time.
    ///
    /// # Returns
    ///
    /// `false` if there was no row to update
    async fn update(
        &self,
        id: ReimbursementId,
        candidate: &ReimbursementCandidate,
    ) -> Result<bool, PortError>;

    /// Deletes reimbursement `id`
    ///
    /// Reports `true` whether or not a row existed.
    async fn delete_by_id(&self, id: ReimbursementId) -> Result<bool, PortError>;
}

/// Mock implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory mock implementation of ReimbursementPort
    ///
    /// Counts every port call and can be switched into a failing mode where
    /// each call returns `PortError::Internal`.
    #[derive(Debug)]
    pub struct MockReimbursementPort {
        rows: Arc<RwLock<BTreeMap<ReimbursementId, Reimbursement>>>,
        next_id: AtomicI32,
        calls: AtomicUsize,
        failing: AtomicBool,
        last_update: RwLock<Option<(ReimbursementId, ReimbursementCandidate)>>,
    }

    impl Default for MockReimbursementPort {
        fn default() -> Self {
            Self {
                rows: Arc::default(),
                next_id: AtomicI32::new(1),
                calls: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
                last_update: RwLock::new(None),
            }
        }
    }

    impl MockReimbursementPort {
        /// Creates a new, empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with reimbursements for testing
        pub async fn with_reimbursements(reimbursements: Vec<Reimbursement>) -> Self {
            let port = Self::new();
            let mut max_id = 0;
            {
                let mut rows = port.rows.write().await;
                for r in reimbursements {
                    max_id = max_id.max(r.id.get());
                    rows.insert(r.id, r);
                }
            }
            port.next_id.store(max_id + 1, Ordering::SeqCst);
            port
        }

        /// Makes every subsequent call fail (or succeed again)
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Number of port calls made so far
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// The id and candidate passed to the most recent `update`
        pub async fn last_update(&self) -> Option<(ReimbursementId, ReimbursementCandidate)> {
            self.last_update.read().await.clone()
        }

        /// Number of stored rows
        pub async fn len(&self) -> usize {
            self.rows.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.rows.read().await.is_empty()
        }

        fn enter(&self) -> Result<(), PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                Err(PortError::internal("mock storage failure"))
            } else {
                Ok(())
            }
        }
    }

    impl DomainPort for MockReimbursementPort {}

    #[async_trait]
    impl HealthCheckable for MockReimbursementPort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.failing.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult {
                adapter_id: "mock-reimbursement-port".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ReimbursementPort for MockReimbursementPort {
        async fn get_all(&self) -> Result<Vec<Reimbursement>, PortError> {
            self.enter()?;
            Ok(self.rows.read().await.values().cloned().collect())
        }

        async fn get_all_by_user(&self, user_id: UserId) -> Result<Vec<Reimbursement>, PortError> {
            self.enter()?;
            Ok(self
                .rows
                .read()
                .await
                .values()
                .filter(|r| r.author_id == user_id)
                .cloned()
                .collect())
        }

        async fn get_by_id(&self, id: ReimbursementId) -> Result<Option<Reimbursement>, PortError> {
            self.enter()?;
            Ok(self.rows.read().await.get(&id).cloned())
        }

        async fn submit(&self, candidate: &ReimbursementCandidate) -> Result<Reimbursement, PortError> {
            self.enter()?;
            let id = ReimbursementId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            let reimbursement = Reimbursement {
                id,
                amount: candidate.amount,
                submitted: Utc::now().naive_utc(),
                resolved: None,
                description: candidate.description.clone(),
                receipt: None,
                author_id: candidate.author_id,
                resolver_id: None,
                reimb_status_id: candidate.reimb_status_id,
                reimb_type_id: candidate.reimb_type_id,
            };
            self.rows.write().await.insert(id, reimbursement.clone());
            Ok(reimbursement)
        }

        async fn update(
            &self,
            id: ReimbursementId,
            candidate: &ReimbursementCandidate,
        ) -> Result<bool, PortError> {
            self.enter()?;
            *self.last_update.write().await = Some((id, candidate.clone()));

            let mut rows = self.rows.write().await;
            let Some(existing) = rows.get_mut(&id) else {
                return Ok(false);
            };
            existing.amount = candidate.amount;
            existing.resolved = candidate.resolved.or_else(|| Some(Utc::now().naive_utc()));
            existing.description = candidate.description.clone();
            existing.receipt = None;
            existing.author_id = candidate.author_id;
            existing.resolver_id = candidate.resolver_id;
            existing.reimb_status_id = candidate.reimb_status_id;
            existing.reimb_type_id = candidate.reimb_type_id;
            Ok(true)
        }

        async fn delete_by_id(&self, id: ReimbursementId) -> Result<bool, PortError> {
            self.enter()?;
            self.rows.write().await.remove(&id);
            Ok(true)
        }
    }
}
