//! Reimbursement service
//!
//! The service is the gatekeeper in front of the storage port: raw ids from
//! the outside world are parsed and validated here, candidates are checked,
//! and storage outcomes (empty lists, missing rows) become domain errors.
//! It never calls the port with input it has not vetted.

use std::sync::Arc;

use tracing::instrument;

use core_kernel::{HealthCheckResult, ReimbursementId, UserId};

use crate::error::ReimbursementError;
use crate::ports::ReimbursementPort;
use crate::reimbursement::{Reimbursement, ReimbursementCandidate};
use crate::validation::ReimbursementValidator;

/// Service orchestrating validation and storage for reimbursements
#[derive(Clone)]
pub struct ReimbursementService {
    port: Arc<dyn ReimbursementPort>,
}

impl ReimbursementService {
    /// Creates a new service over the given storage port
    pub fn new(port: Arc<dyn ReimbursementPort>) -> Self {
        Self { port }
    }

    /// Retrieves every reimbursement
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when storage holds no reimbursements at all,
    /// and `InternalServerError` if storage fails
    #[instrument(skip(self))]
    pub async fn get_all_reimbursements(&self) -> Result<Vec<Reimbursement>, ReimbursementError> {
        let reimbursements = self.port.get_all().await?;

        if reimbursements.is_empty() {
            return Err(ReimbursementError::not_found("No reimbursements found"));
        }

        Ok(reimbursements)
    }

    /// Retrieves the reimbursements authored by a user
    ///
    /// # Arguments
    ///
    /// * `raw_user_id` - The user id as supplied by the caller
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an invalid id and `ResourceNotFound` when the
    /// user has no reimbursements
    #[instrument(skip(self))]
    pub async fn get_all_reimbursements_by_user(
        &self,
        raw_user_id: &str,
    ) -> Result<Vec<Reimbursement>, ReimbursementError> {
        let user_id = UserId::parse(raw_user_id)?;

        let reimbursements = self.port.get_all_by_user(user_id).await?;

        if reimbursements.is_empty() {
            return Err(ReimbursementError::not_found(format!(
                "No reimbursements found for user {}",
                user_id
            )));
        }

        Ok(reimbursements)
    }

    /// Retrieves a reimbursement by id
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an invalid id and `ResourceNotFound` when no
    /// reimbursement has that id
    #[instrument(skip(self))]
    pub async fn get_reimbursement_by_id(
        &self,
        raw_id: &str,
    ) -> Result<Reimbursement, ReimbursementError> {
        let id = ReimbursementId::parse(raw_id)?;

        self.port
            .get_by_id(id)
            .await?
            .ok_or_else(|| ReimbursementError::not_found(format!("Reimbursement {} not found", id)))
    }

    /// Submits a new reimbursement
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if the candidate fails validation
    #[instrument(skip(self, candidate), fields(author_id = %candidate.author_id))]
    pub async fn submit_reimbursement(
        &self,
        candidate: ReimbursementCandidate,
    ) -> Result<Reimbursement, ReimbursementError> {
        ReimbursementValidator::validate(&candidate).into_result()?;

        let persisted = self.port.submit(&candidate).await?;

        Ok(persisted)
    }

    /// Replaces a reimbursement's mutable fields
    ///
    /// The path id is authoritative: whatever id the candidate carried is
    /// overwritten before storage sees it.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an invalid id or candidate, and
    /// `ResourceNotFound` if there is no reimbursement with that id
    #[instrument(skip(self, candidate))]
    pub async fn update_reimbursement(
        &self,
        raw_id: &str,
        mut candidate: ReimbursementCandidate,
    ) -> Result<bool, ReimbursementError> {
        let id = ReimbursementId::parse(raw_id)?;
        ReimbursementValidator::validate(&candidate).into_result()?;

        candidate.id = Some(id);

        if self.port.update(id, &candidate).await? {
            Ok(true)
        } else {
            Err(ReimbursementError::not_found(format!("Reimbursement {} not found", id)))
        }
    }

    /// Deletes a reimbursement by id
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an invalid id
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, raw_id: &str) -> Result<bool, ReimbursementError> {
        let id = ReimbursementId::parse(raw_id)?;

        Ok(self.port.delete_by_id(id).await?)
    }

    /// Reports the health of the underlying storage port
    pub async fn health_check(&self) -> HealthCheckResult {
        self.port.health_check().await
    }
}
