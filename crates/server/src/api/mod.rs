//! HTTP API routes
//!
//! Each endpoint translates one browser request into object store calls.
//! Handlers are organized one module per concern.

use axum::Router;
use axum::extract::{DefaultBodyLimit, FromRequestParts, Query};
use axum::routing::{delete, get, post};
use sb_core::{Error, ServerSettings};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

mod download;
mod info;
mod list;
mod remove;
mod upload;

/// Query extractor whose rejection is a JSON error body
#[derive(FromRequestParts, Debug)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `?key=` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct KeyQuery {
    pub key: Option<String>,
}

/// `?prefix=` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct PrefixQuery {
    pub prefix: Option<String>,
}

/// Return the parameter value, treating an empty value as absent
fn required(value: Option<String>, name: &'static str) -> Result<String, Error> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingParameter(name))
}

/// Build the application router
///
/// Anything outside `/api` and `/health` is served from the static UI
/// directory.
pub fn router(state: AppState, settings: &ServerSettings) -> Router {
    Router::new()
        .route("/api/list", get(list::handle))
        .route("/api/download", get(download::handle))
        .route("/api/info", get(info::handle))
        .route(
            "/api/upload",
            post(upload::handle).layer(DefaultBodyLimit::max(settings.upload_limit())),
        )
        .route("/api/delete", delete(remove::handle_file))
        .route("/api/delete-folder", delete(remove::handle_folder))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .fallback_service(ServeDir::new(&settings.static_dir))
        .layer(TraceLayer::new_for_http())
}
