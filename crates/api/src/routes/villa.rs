//! Route definitions for villas.

use axum::routing::get;
use axum::Router;

use crate::handlers::villa;
use crate::state::AppState;

/// Public path of the villa collection, used for `Location` headers.
pub const BASE_PATH: &str = "/api/villa";

/// Routes mounted at `/villa`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// PATCH  /{id}   -> partial_update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(villa::list).post(villa::create))
        .route(
            "/{id}",
            get(villa::get_by_id)
                .put(villa::update)
                .patch(villa::partial_update)
                .delete(villa::delete),
        )
}
