//! Reimbursement handlers
//!
//! Path ids are passed to the service as raw strings; the service decides
//! whether they are valid.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::reimbursement::{ReimbursementRequest, ReimbursementResponse};
use crate::{error::ApiError, AppState};

/// Lists every reimbursement
pub async fn list_reimbursements(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReimbursementResponse>>, ApiError> {
    let reimbursements = state.service.get_all_reimbursements().await?;
    Ok(Json(reimbursements.into_iter().map(Into::into).collect()))
}

/// Lists the reimbursements authored by a user
pub async fn list_user_reimbursements(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ReimbursementResponse>>, ApiError> {
    let reimbursements = state.service.get_all_reimbursements_by_user(&user_id).await?;
    Ok(Json(reimbursements.into_iter().map(Into::into).collect()))
}

/// Gets a reimbursement by ID
pub async fn get_reimbursement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReimbursementResponse>, ApiError> {
    let reimbursement = state.service.get_reimbursement_by_id(&id).await?;
    Ok(Json(reimbursement.into()))
}

/// Submits a new reimbursement
pub async fn submit_reimbursement(
    State(state): State<AppState>,
    payload: Result<Json<ReimbursementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReimbursementResponse>), ApiError> {
    let Json(request) = payload?;
    let persisted = state.service.submit_reimbursement(request.into()).await?;
    Ok((StatusCode::CREATED, Json(persisted.into())))
}

/// Replaces a reimbursement (PATCH and PUT)
pub async fn update_reimbursement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReimbursementRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    state.service.update_reimbursement(&id, request.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a reimbursement
pub async fn delete_reimbursement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
