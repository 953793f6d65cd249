//! Handlers for the `/api/villa` resource.
//!
//! Every handler reports its outcome through the injected
//! [`villa_core::logging::Logging`] sink: `success` when the operation
//! completed, `error` when the request was rejected.
//!
//! Bodies are bare JSON: a list of villas, or a single villa.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use villa_core::error::CoreError;
use villa_core::logging::{LEVEL_ERROR, LEVEL_SUCCESS, LEVEL_WARNING};
use villa_core::patch::PatchDocument;
use villa_core::types::DbId;
use villa_core::validation::{validate_dto, validate_id, ModelErrors};
use villa_core::villa::ENTITY;
use villa_db::mapping::{apply_update, to_dtos};
use villa_db::models::villa::{NewVilla, VillaCreateDto, VillaDto, VillaUpdateDto};
use villa_db::store::{StoreError, VillaFilter};

use crate::error::{AppError, AppResult};
use crate::routes::villa::BASE_PATH;
use crate::state::AppState;

/// JSON body that may be absent, malformed, or literally `null`.
type Body<T> = Result<Json<Option<T>>, JsonRejection>;

/// `{id}` path segment that may fail to parse.
type IdPath = Result<Path<DbId>, PathRejection>;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/villa
///
/// List every villa.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let villas = state.store.get_all(None).await?;
    state.logger.log("Getting all villas", LEVEL_SUCCESS);
    Ok(Json(to_dtos(villas)))
}

/// GET /api/villa/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&state, "Get villa", path)?;
    let action = format!("Get villa {id}");
    check_id(&state, &action, id)?;

    let villa = state
        .store
        .get(&VillaFilter::Id(id))
        .await?
        .ok_or_else(|| reject(&state, &action, not_found(id)))?;

    state.logger.log(&format!("Getting villa {id}"), LEVEL_SUCCESS);
    Ok(Json(VillaDto::from(villa)))
}

/// POST /api/villa
///
/// Create a villa. Names are unique regardless of ASCII case. Responds 201 with a
/// `Location` header pointing at the new villa.
pub async fn create(
    State(state): State<AppState>,
    body: Body<VillaCreateDto>,
) -> AppResult<impl IntoResponse> {
    let action = "Create villa";
    let input = require_body(&state, action, body)?;
    validate_dto(&input).map_err(|e| reject(&state, action, e))?;

    let existing = state
        .store
        .get(&VillaFilter::NameIgnoreCase(input.name.clone()))
        .await?;
    if existing.is_some() {
        return Err(reject(&state, action, StoreError::DuplicateName(input.name)));
    }

    let villa = state
        .store
        .create(&NewVilla::from(input))
        .await
        .map_err(|e| reject(&state, action, e))?;

    state.logger.log(
        &format!("Created villa {} ({})", villa.id, villa.name),
        LEVEL_SUCCESS,
    );

    let location = format!("{BASE_PATH}/{}", villa.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(VillaDto::from(villa)),
    ))
}

/// DELETE /api/villa/{id}
pub async fn delete(
    State(state): State<AppState>,
    path: IdPath,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&state, "Delete villa", path)?;
    let action = format!("Delete villa {id}");
    check_id(&state, &action, id)?;

    let tracked = state
        .store
        .get_tracked(&VillaFilter::Id(id))
        .await?
        .ok_or_else(|| reject(&state, &action, not_found(id)))?;

    if !tracked.remove().await? {
        return Err(reject(&state, &action, not_found(id)));
    }

    state.logger.log(&format!("Deleted villa {id}"), LEVEL_SUCCESS);
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/villa/{id}
///
/// Replace every editable field of a villa. The body's `id` must match the
/// path. Responds 404 if the villa does not exist.
pub async fn update(
    State(state): State<AppState>,
    path: IdPath,
    body: Body<VillaUpdateDto>,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&state, "Update villa", path)?;
    let action = format!("Update villa {id}");
    let input = require_body(&state, &action, body)?;
    if input.id != id {
        return Err(reject(
            &state,
            &action,
            AppError::BadRequest(format!(
                "Body id {} does not match path id {id}",
                input.id
            )),
        ));
    }
    check_id(&state, &action, id)?;
    validate_dto(&input).map_err(|e| reject(&state, &action, e))?;

    let mut tracked = state
        .store
        .get_tracked(&VillaFilter::Id(id))
        .await?
        .ok_or_else(|| reject(&state, &action, not_found(id)))?;

    apply_update(&mut tracked, input);
    tracked
        .flush()
        .await
        .map_err(|e| reject(&state, &action, e))?
        .ok_or_else(|| reject(&state, &action, not_found(id)))?;

    state.logger.log(&format!("Updated villa {id}"), LEVEL_SUCCESS);
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/villa/{id}
///
/// Apply a patch document to the villa. The patched villa is validated
/// before anything is written; on failure nothing is persisted and the
/// field errors are returned.
pub async fn partial_update(
    State(state): State<AppState>,
    path: IdPath,
    body: Body<PatchDocument>,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&state, "Patch villa", path)?;
    let action = format!("Patch villa {id}");
    let patch = require_body(&state, &action, body)?;
    check_id(&state, &action, id)?;
    if patch.is_empty() {
        state
            .logger
            .log(&format!("{action}: document has no operations"), LEVEL_WARNING);
    }

    let mut villa = state
        .store
        .get(&VillaFilter::Id(id))
        .await?
        .ok_or_else(|| reject(&state, &action, not_found(id)))?;

    let patched = patch
        .apply_to(&VillaUpdateDto::from(&villa))
        .map_err(|errors| reject(&state, &action, CoreError::Model(errors)))?;
    if patched.id != id {
        return Err(reject(
            &state,
            &action,
            CoreError::Model(ModelErrors::single("id", "The id of a villa cannot be changed")),
        ));
    }
    validate_dto(&patched).map_err(|e| reject(&state, &action, e))?;

    apply_update(&mut villa, patched);
    state
        .store
        .update(&villa)
        .await
        .map_err(|e| reject(&state, &action, e))?
        .ok_or_else(|| reject(&state, &action, not_found(id)))?;

    state.logger.log(
        &format!("Patched villa {id} ({} operations)", patch.operations().len()),
        LEVEL_SUCCESS,
    );
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Log a rejected request and hand the error back for returning.
fn reject(state: &AppState, action: &str, err: impl Into<AppError>) -> AppError {
    let err = err.into();
    state
        .logger
        .log(&format!("{action} failed: {err}"), LEVEL_ERROR);
    err
}

/// Extract the `{id}` segment, rejecting non-numeric values as bad requests.
fn path_id(state: &AppState, action: &str, path: IdPath) -> AppResult<DbId> {
    path.map(|Path(id)| id)
        .map_err(|rejection| reject(state, action, rejection))
}

fn check_id(state: &AppState, action: &str, id: DbId) -> AppResult<()> {
    validate_id(id).map_err(|e| reject(state, action, e))
}

/// Unwrap a JSON body, treating a missing or `null` body as a bad request.
fn require_body<T>(state: &AppState, action: &str, body: Body<T>) -> AppResult<T> {
    match body {
        Ok(Json(Some(value))) => Ok(value),
        Ok(Json(None)) => Err(reject(
            state,
            action,
            AppError::BadRequest("Request body is required".to_string()),
        )),
        Err(rejection) => Err(reject(state, action, rejection)),
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}
