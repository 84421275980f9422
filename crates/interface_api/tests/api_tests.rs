//! HTTP tests for the reimbursement API
//!
//! Requests are driven through the full router (auth, audit and admin
//! middleware included) against an in-memory storage port.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use domain_reimbursement::{MockReimbursementPort, ReimbursementService};
use interface_api::{
    auth::{create_token, roles},
    config::ApiConfig,
    create_router,
    dto::reimbursement::ReimbursementResponse,
    error::ErrorResponse,
    handlers::health::HealthResponse,
    middleware::REQUEST_ID_HEADER,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use test_utils::{ReimbursementFixtures, UserFixtures};
use tower::ServiceExt;

const SECRET: &str = "api-test-secret";

fn config() -> ApiConfig {
    ApiConfig {
        jwt_secret: SECRET.to_string(),
        ..ApiConfig::default()
    }
}

async fn seeded_port() -> Arc<MockReimbursementPort> {
    Arc::new(MockReimbursementPort::with_reimbursements(ReimbursementFixtures::all()).await)
}

fn app(port: Arc<MockReimbursementPort>) -> Router {
    create_router(ReimbursementService::new(port), config())
}

fn token(role: &str) -> String {
    create_token("aanderson", vec![role.to_string()], SECRET, 3600).unwrap()
}

fn admin_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token(roles::ADMIN)));

    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn dinner_body() -> serde_json::Value {
    json!({
        "amount": "35.50",
        "description": "Client dinner",
        "author_id": UserFixtures::admin().get(),
        "reimb_status_id": 1,
        "reimb_type_id": 3
    })
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_liveness_needs_no_token() {
        let response = app(seeded_port().await)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: HealthResponse = body_json(response).await;
        assert_eq!(body.status, "healthy");
    }

    #[tokio::test]
    async fn test_readiness_reports_storage_failure() {
        let port = seeded_port().await;
        port.set_failing(true);

        let response = app(port)
            .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_readiness_ok_when_storage_answers() {
        let response = app(seeded_port().await)
            .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: HealthResponse = body_json(response).await;
        assert_eq!(body.status, "ready");
    }
}

mod access_control {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let port = seeded_port().await;
        let response = app(port.clone())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/reimbursements")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "unauthorized");
        assert_eq!(port.calls(), 0);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_unauthorized() {
        let forged = create_token("mallory", vec![roles::ADMIN.to_string()], "other", 3600).unwrap();

        let response = app(seeded_port().await)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/reimbursements")
                    .header(header::AUTHORIZATION, format!("Bearer {}", forged))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_employee_is_forbidden() {
        let port = seeded_port().await;
        let response = app(port.clone())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/reimbursements/1")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token(roles::EMPLOYEE)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "forbidden");
        assert_eq!(port.calls(), 0);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = app(seeded_port().await)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/reimbursements/1")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token(roles::ADMIN)))
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    }

    #[tokio::test]
    async fn test_rejected_requests_carry_request_id() {
        let unauthenticated = app(seeded_port().await)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/reimbursements")
                    .header(REQUEST_ID_HEADER, "req-401")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unauthenticated.headers()[REQUEST_ID_HEADER], "req-401");

        let forbidden = app(seeded_port().await)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/reimbursements")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token(roles::EMPLOYEE)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert!(forbidden.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_request_id_is_generated_when_absent() {
        let response = app(seeded_port().await)
            .oneshot(admin_request("GET", "/api/v1/reimbursements/1", None))
            .await
            .unwrap();

        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}

mod reads {
    use super::*;

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let response = app(seeded_port().await)
            .oneshot(admin_request("GET", "/api/v1/reimbursements", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<ReimbursementResponse> = body_json(response).await;
        let ids: Vec<i32> = body.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_list_is_not_found() {
        let response = app(Arc::new(MockReimbursementPort::new()))
            .oneshot(admin_request("GET", "/api/v1/reimbursements", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let response = app(seeded_port().await)
            .oneshot(admin_request("GET", "/api/v1/reimbursements/1", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ReimbursementResponse = body_json(response).await;
        assert_eq!(body.id, 1);
        assert_eq!(body.description, "Lunch Conference");
    }

    #[tokio::test]
    async fn test_invalid_ids_are_bad_requests() {
        for raw in ["0", "-4", "1.5", "abc"] {
            let port = seeded_port().await;
            let uri = format!("/api/v1/reimbursements/{}", raw);
            let response = app(port.clone())
                .oneshot(admin_request("GET", &uri, None))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "id {:?}", raw);
            assert_eq!(port.calls(), 0, "id {:?} reached storage", raw);
        }
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let response = app(seeded_port().await)
            .oneshot(admin_request("GET", "/api/v1/reimbursements/99", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "not_found");
    }

    #[tokio::test]
    async fn test_list_by_user() {
        let uri = format!("/api/v1/users/{}/reimbursements", UserFixtures::employee());
        let response = app(seeded_port().await)
            .oneshot(admin_request("GET", &uri, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<ReimbursementResponse> = body_json(response).await;
        assert_eq!(body.len(), 2);
        assert!(body.iter().all(|r| r.author_id == UserFixtures::employee().get()));
    }

    #[tokio::test]
    async fn test_list_by_invalid_user_is_bad_request() {
        let response = app(seeded_port().await)
            .oneshot(admin_request("GET", "/api/v1/users/0/reimbursements", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod writes {
    use super::*;

    #[tokio::test]
    async fn test_submit_returns_created_record() {
        let port = seeded_port().await;
        let response = app(port.clone())
            .oneshot(admin_request("POST", "/api/v1/reimbursements", Some(dinner_body())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: ReimbursementResponse = body_json(response).await;
        assert_eq!(body.id, 4);
        assert_eq!(body.description, "Client dinner");
        assert_eq!(port.len().await, 4);
    }

    #[tokio::test]
    async fn test_submit_with_negative_amount_is_bad_request() {
        let mut body = dinner_body();
        body["amount"] = json!("-1.00");

        let port = seeded_port().await;
        let response = app(port.clone())
            .oneshot(admin_request("POST", "/api/v1/reimbursements", Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(port.calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_with_sub_cent_amount_is_bad_request() {
        let mut body = dinner_body();
        body["amount"] = json!("1.999");

        let port = seeded_port().await;
        let response = app(port.clone())
            .oneshot(admin_request("POST", "/api/v1/reimbursements", Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(port.len().await, 3);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = app(seeded_port().await)
            .oneshot(admin_request(
                "POST",
                "/api/v1/reimbursements",
                Some(json!({ "amount": "1.00" })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "bad_request");
    }

    #[tokio::test]
    async fn test_update_uses_path_id() {
        let mut body = dinner_body();
        body["id"] = json!(3);

        let port = seeded_port().await;
        let response = app(port.clone())
            .oneshot(admin_request("PATCH", "/api/v1/reimbursements/2", Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let (id, candidate) = port.last_update().await.unwrap();
        assert_eq!(id.get(), 2);
        assert_eq!(candidate.id.map(|i| i.get()), Some(2));
    }

    #[tokio::test]
    async fn test_put_is_accepted_for_update() {
        let response = app(seeded_port().await)
            .oneshot(admin_request("PUT", "/api/v1/reimbursements/1", Some(dinner_body())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_update_of_missing_row_is_not_found() {
        let response = app(seeded_port().await)
            .oneshot(admin_request("PATCH", "/api/v1/reimbursements/99", Some(dinner_body())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete() {
        let port = seeded_port().await;
        let response = app(port.clone())
            .oneshot(admin_request("DELETE", "/api/v1/reimbursements/3", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(port.len().await, 2);
    }

    #[tokio::test]
    async fn test_delete_with_invalid_id_is_bad_request() {
        let port = seeded_port().await;
        let response = app(port.clone())
            .oneshot(admin_request("DELETE", "/api/v1/reimbursements/1.5", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(port.len().await, 3);
    }
}

mod storage_failures {
    use super::*;

    #[tokio::test]
    async fn test_failure_is_opaque_internal_error() {
        let port = seeded_port().await;
        port.set_failing(true);

        let response = app(port)
            .oneshot(admin_request("GET", "/api/v1/reimbursements/1", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "internal_error");
        assert!(!body.message.contains("mock"));
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{fractional_raw_id_strategy, non_positive_raw_id_strategy};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn invalid_path_ids_are_rejected_before_storage(raw in prop_oneof![
            non_positive_raw_id_strategy(),
            fractional_raw_id_strategy(),
        ]) {
            let rt = runtime();
            let port = rt.block_on(seeded_port());
            let uri = format!("/api/v1/reimbursements/{}", raw);

            let response = rt
                .block_on(app(port.clone()).oneshot(admin_request("DELETE", &uri, None)))
                .unwrap();

            prop_assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            prop_assert_eq!(port.calls(), 0);
        }
    }
}
