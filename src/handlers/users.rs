//! User CRUD handlers: create, read, list, update, delete.

use crate::error::AppError;
use crate::extractors::{JsonBody, UserId};
use crate::model::{CreateUserBody, UpdateUserBody};
use crate::response::json_response;
use crate::service::RequestValidator;
use crate::state::AppState;
use crate::store::StoreError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateUserBody>,
) -> Result<Response, AppError> {
    let new_user = RequestValidator::validate_create(body)?;
    let user = state.store.create(new_user).await?;
    tracing::debug!(id = user.id, "user created");
    Ok(json_response(StatusCode::CREATED, user))
}

pub async fn read(State(state): State<AppState>, UserId(id): UserId) -> Result<Response, AppError> {
    let user = state.store.get(id).await?.ok_or(AppError::NotFound(id))?;
    Ok(json_response(StatusCode::OK, user))
}

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let users = state.store.list().await?;
    Ok(json_response(StatusCode::OK, users))
}

/// Partial update: only fields present in the body change. An empty body is a no-op.
pub async fn update(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(body): JsonBody<UpdateUserBody>,
) -> Result<Response, AppError> {
    let existing = state.store.get(id).await?.ok_or(AppError::NotFound(id))?;
    let changes = RequestValidator::validate_partial(body)?;
    if changes.is_empty() {
        return Ok(json_response(StatusCode::OK, existing));
    }
    let user = state
        .store
        .update(id, changes)
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => AppError::Conflict("duplicate email".into()),
            StoreError::Db(e) => AppError::BadRequest(e.to_string()),
        })?
        // Deleted between the load and the write.
        .ok_or(AppError::NotFound(id))?;
    tracing::debug!(id, "user updated");
    Ok(json_response(StatusCode::OK, user))
}

pub async fn delete(State(state): State<AppState>, UserId(id): UserId) -> Result<Response, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(id));
    }
    tracing::debug!(id, "user deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}
