//! POST /api/upload - Store an uploaded file
//!
//! Expects a multipart form with a `file` part plus optional `fileName` and
//! `prefix` fields. The whole file is buffered in memory before it is written.

use axum::Json;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartRejection};
use sb_core::prefix::object_key;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub key: String,
}

/// The `file` part of the form
struct UploadedFile {
    original_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// All recognised fields of the form
#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    file_name: Option<String>,
    prefix: String,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let original_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    // Takes over the buffer when the part arrived whole
                    let data = Vec::from(field.bytes().await?);
                    form.file = Some(UploadedFile {
                        original_name,
                        content_type,
                        data,
                    });
                }
                "fileName" => form.file_name = Some(field.text().await?),
                "prefix" => form.prefix = field.text().await?,
                other => tracing::debug!(field = other, "Ignoring unknown upload field"),
            }
        }

        Ok(form)
    }
}

/// Content type declared by the browser, else guessed from the name
fn content_type_for(declared: Option<String>, name: &str) -> String {
    declared
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| mime_guess::from_path(name).first_or_octet_stream().to_string())
}

pub async fn handle(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let form = UploadForm::read(multipart?).await?;

    let file = form
        .file
        .ok_or_else(|| ApiError::BadRequest("No file provided".into()))?;

    let name = form
        .file_name
        .filter(|n| !n.is_empty())
        .or(file.original_name)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::BadRequest("File name is required".into()))?;

    let key = object_key(&form.prefix, &name);
    let content_type = content_type_for(file.content_type, &name);
    let size = file.data.len();

    state
        .store
        .put_object(&key, file.data, Some(content_type))
        .await?;

    tracing::info!(
        key = %key,
        size = %humansize::format_size(size as u64, humansize::BINARY),
        "Uploaded object"
    );

    Ok(Json(UploadResponse { success: true, key }))
}
