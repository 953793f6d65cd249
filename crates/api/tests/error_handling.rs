//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router or
//! store is involved.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use villa_api::error::AppError;
use villa_core::error::CoreError;
use villa_core::validation::ModelErrors;
use villa_db::store::StoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Villa",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Villa with id 42 not found");
    assert!(json.get("errors").is_none());
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Request body is required".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Request body is required");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Id must be positive".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Id must be positive");
}

#[tokio::test]
async fn model_errors_are_listed_per_field() {
    let mut errors = ModelErrors::new();
    errors.add("rate", "Rate must not be negative");
    errors.add("name", "Name must be 1 to 30 characters");
    errors.add("name", "Name is required");

    let (status, json) = error_to_response(AppError::Core(CoreError::Model(errors))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"]["rate"][0], "Rate must not be negative");
    assert_eq!(json["errors"]["name"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_name_returns_400_with_name_error() {
    let err = AppError::Store(StoreError::DuplicateName("Pool View".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "DUPLICATE_NAME");
    assert_eq!(json["errors"]["name"][0], "Villa already exists");
}

#[tokio::test]
async fn database_errors_return_sanitized_500() {
    for err in [
        sqlx::Error::PoolTimedOut,
        sqlx::Error::RowNotFound,
        sqlx::Error::Protocol("password authentication failed for villa_admin".into()),
    ] {
        let (status, json) = error_to_response(AppError::Store(StoreError::Database(err))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
        assert!(
            !json.to_string().contains("villa_admin"),
            "Database error response must not leak details"
        );
    }
}

#[test]
fn domain_errors_convert_into_app_errors() {
    let err: AppError = StoreError::DuplicateName("Pool View".into()).into();
    assert_matches!(err, AppError::Store(StoreError::DuplicateName(name)) if name == "Pool View");

    let err: AppError = CoreError::from(ModelErrors::single("rate", "negative")).into();
    assert_matches!(err, AppError::Core(CoreError::Model(_)));
}
