//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use tower::ServiceExt;
use villa_api::router::build_app_router;
use villa_api::state::AppState;
use villa_core::logging::MemoryLogging;
use villa_core::types::DbId;
use villa_db::models::villa::{NewVilla, Villa};
use villa_db::repositories::InMemoryVillaStore;
use villa_db::store::{StoreError, VillaFilter, VillaStore};

/// A store whose backing database is unreachable.
struct UnreachableStore;

fn unreachable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl VillaStore for UnreachableStore {
    async fn get_all(&self, _filter: Option<&VillaFilter>) -> Result<Vec<Villa>, StoreError> {
        Err(unreachable())
    }

    async fn get(&self, _filter: &VillaFilter) -> Result<Option<Villa>, StoreError> {
        Err(unreachable())
    }

    async fn create(&self, _villa: &NewVilla) -> Result<Villa, StoreError> {
        Err(unreachable())
    }

    async fn update(&self, _villa: &Villa) -> Result<Option<Villa>, StoreError> {
        Err(unreachable())
    }

    async fn remove(&self, _id: DbId) -> Result<bool, StoreError> {
        Err(unreachable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unreachable())
    }
}

fn unreachable_app() -> axum::Router {
    let config = common::test_config();
    let state = AppState {
        store: Arc::new(UnreachableStore),
        logger: Arc::new(MemoryLogging::new()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app(InMemoryVillaStore::new());
    let response = get(app.router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store"], "memory");
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn health_check_reports_unreachable_store() {
    let response = get(unreachable_app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

#[tokio::test]
async fn store_failure_returns_sanitized_500() {
    let response = get(unreachable_app(), "/api/villa").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("pool"));
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(InMemoryVillaStore::new());
    let response = get(app.router(), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(InMemoryVillaStore::new());
    let response = get(app.router(), "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a valid UUID (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_villa_methods() {
    let app = common::build_test_app(InMemoryVillaStore::new());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/villa/1")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PATCH")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    let allow_origin = headers
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("PATCH"),
        "Allow-Methods should contain PATCH, got: {allow_methods}"
    );
}
