//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{self, roles, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Subject of the validated token, attached to the response for the audit log
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

/// Authentication middleware
///
/// Validates the bearer token and stores its claims in request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| {
            warn!("Missing or invalid Authorization header");
            ApiError::Unauthorized("No session found, please log in".to_string())
        })?;

    match auth::validate_token(token, &state.config.jwt_secret) {
        Ok(claims) => {
            let user = AuthenticatedUser(claims.sub.clone());
            request.extensions_mut().insert(claims);
            let mut response = next.run(request).await;
            response.extensions_mut().insert(user);
            Ok(response)
        }
        Err(e) => {
            warn!("Token validation failed: {:?}", e);
            Err(ApiError::Unauthorized(e.to_string()))
        }
    }
}

/// Authorization middleware admitting only principals with the admin role
pub async fn require_admin(request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| ApiError::Unauthorized("No session found, please log in".to_string()))?;

    if !auth::has_role(claims, roles::ADMIN) {
        warn!(user = %claims.sub, "Admin role required");
        return Err(ApiError::Forbidden(
            "You do not have permission to access this resource".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Audit logging middleware
///
/// Logs every API request with a correlation id, reusing the caller's
/// `x-request-id` when present and echoing it on the response. It runs
/// outside authentication, so rejected requests are audited as `anonymous`.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let start = Utc::now();

    let mut response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();
    let user_id = response
        .extensions()
        .get::<AuthenticatedUser>()
        .map_or("anonymous", |u| u.0.as_str())
        .to_string();

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
