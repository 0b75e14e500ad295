//! DELETE /api/delete and /api/delete-folder - Remove objects

use axum::Json;
use axum::extract::State;
use sb_core::delete_folder;
use serde::Serialize;

use super::{ApiQuery, KeyQuery, PrefixQuery, required};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteFolderResponse {
    pub success: bool,
    pub deleted: usize,
}

/// Remove a single object
pub async fn handle_file(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<KeyQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let key = required(query.key, "Key")?;
    state.store.delete_object(&key).await?;

    tracing::info!(key = %key, "Deleted object");
    Ok(Json(DeleteResponse { success: true }))
}

/// Remove every object under a prefix
///
/// Not atomic: a failed delete leaves the folder partially removed.
pub async fn handle_folder(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PrefixQuery>,
) -> Result<Json<DeleteFolderResponse>, ApiError> {
    let prefix = required(query.prefix, "Prefix")?;
    let result = delete_folder(state.store.as_ref(), &prefix, state.delete_concurrency).await?;

    Ok(Json(DeleteFolderResponse {
        success: true,
        deleted: result.deleted,
    }))
}
