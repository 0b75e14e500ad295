//! GET /api/info - Show object metadata

use axum::Json;
use axum::extract::State;
use jiff::Timestamp;
use serde::Serialize;

use super::{ApiQuery, KeyQuery, required};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub size: Option<i64>,
    pub content_type: Option<String>,
    pub last_modified: Option<Timestamp>,
    pub etag: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<KeyQuery>,
) -> Result<Json<InfoResponse>, ApiError> {
    let key = required(query.key, "Key")?;
    let info = state.store.head_object(&key).await?;

    Ok(Json(InfoResponse {
        size: info.size_bytes,
        content_type: info.content_type,
        last_modified: info.last_modified,
        etag: info.etag,
    }))
}
