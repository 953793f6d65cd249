#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use villa_api::config::{ServerConfig, StoreBackend};
use villa_api::router::build_app_router;
use villa_api::state::AppState;
use villa_core::logging::MemoryLogging;
use villa_db::models::villa::{NewVilla, Villa};
use villa_db::repositories::InMemoryVillaStore;
use villa_db::store::VillaStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        seed_villas: false,
    }
}

/// A router over an in-memory store, with handles on the store and the
/// log sink for assertions.
pub struct TestApp {
    router: Router,
    pub store: Arc<InMemoryVillaStore>,
    pub logger: Arc<MemoryLogging>,
}

impl TestApp {
    /// A fresh router sharing this app's store and logger.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over the given store.
pub fn build_test_app(store: InMemoryVillaStore) -> TestApp {
    let config = test_config();
    let store = Arc::new(store);
    let logger = Arc::new(MemoryLogging::new());

    let state = AppState {
        store: store.clone(),
        logger: logger.clone(),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        logger,
    }
}

/// Insert a villa directly through the store.
pub async fn seed(store: &InMemoryVillaStore, name: &str, occupancy: i32) -> Villa {
    store
        .create(&NewVilla {
            name: name.to_string(),
            details: format!("{name} details"),
            rate: 150.0,
            occupancy,
            sqft: 120,
            image_url: format!("https://img.example/{}.jpg", name.to_lowercase()),
            amenity: "Wifi".to_string(),
        })
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::POST, uri, Some("application/json"), body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::PUT, uri, Some("application/json"), body.to_string()).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::PATCH, uri, Some("application/json"), body.to_string()).await
}

/// Send a request with an arbitrary body and optional content type.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: String,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
