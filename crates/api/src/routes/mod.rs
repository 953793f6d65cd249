pub mod health;
pub mod villa;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /villa                list, create
/// /villa/{id}           get, update, partial update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/villa", villa::router())
}
