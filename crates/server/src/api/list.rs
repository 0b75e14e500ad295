//! GET /api/list - List the folders and files under a prefix

use axum::Json;
use axum::extract::State;
use sb_core::{Listing, list_prefix};

use super::{ApiQuery, PrefixQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// An absent prefix lists the bucket root
pub async fn handle(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PrefixQuery>,
) -> Result<Json<Listing>, ApiError> {
    let prefix = query.prefix.unwrap_or_default();
    let listing = list_prefix(state.store.as_ref(), &prefix).await?;
    Ok(Json(listing))
}
