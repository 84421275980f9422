//! HTTP API Layer
//!
//! This crate provides the REST API for the reimbursement tracker using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Thin adapters from HTTP to `ReimbursementService`
//! - **Middleware**: Authentication, admin authorization, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent `{ error, message }` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_reimbursement::ReimbursementService;

use crate::config::ApiConfig;
use crate::handlers::{health, reimbursement};
use crate::middleware::{audit_middleware, auth_middleware, require_admin};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ReimbursementService,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Reimbursement service over the configured storage port
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(service: ReimbursementService, config: ApiConfig) -> Router {
    let state = AppState { service, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let reimbursement_routes = Router::new()
        .route(
            "/",
            get(reimbursement::list_reimbursements).post(reimbursement::submit_reimbursement),
        )
        .route(
            "/:id",
            get(reimbursement::get_reimbursement)
                .patch(reimbursement::update_reimbursement)
                .put(reimbursement::update_reimbursement)
                .delete(reimbursement::delete_reimbursement),
        );

    let user_routes = Router::new().route(
        "/:user_id/reimbursements",
        get(reimbursement::list_user_reimbursements),
    );

    // Protected API routes: audit, then auth, then the admin guard
    let api_routes = Router::new()
        .nest("/reimbursements", reimbursement_routes)
        .nest("/users", user_routes)
        .layer(axum_middleware::from_fn(require_admin))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
