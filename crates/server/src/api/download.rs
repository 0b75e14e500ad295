//! GET /api/download - Generate a time-limited download link

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::{ApiQuery, KeyQuery, required};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub url: String,
}

pub async fn handle(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<KeyQuery>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let key = required(query.key, "Key")?;

    let url = state
        .store
        .presigned_url(&key, state.presign_expiry)
        .await?;

    tracing::debug!(
        key = %key,
        expires_secs = state.presign_expiry.as_secs(),
        "Generated download URL"
    );

    Ok(Json(DownloadResponse { url }))
}
