use crate::error::{ErrorResponse, HttpAppError};
use crate::state::UploadState;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use packhouse_core::models::{UploadResponse, UploadedFile};
use packhouse_core::AppError;

#[utoipa::path(
    post,
    path = "/upload",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Multipart form with a single `file` field"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Failed to write file", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(uploads, multipart))]
pub async fn upload_file(
    State(uploads): State<UploadState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        AppError::InvalidInput(format!("Expected multipart/form-data: {}", rejection.body_text()))
    })?;

    // Oversized bodies are cut off by the router's body limit while the
    // multipart stream is read and surface here as PayloadTooLarge.
    let (data, original_name) = extract_multipart_file(multipart).await?;
    let size_bytes = data.len();

    let stored = uploads.storage.upload(&original_name, data).await?;

    let file = UploadedFile {
        original_name,
        storage_name: stored.key,
        url: stored.url,
    };

    tracing::info!(
        original_name = %file.original_name,
        storage_name = %file.storage_name,
        size_bytes,
        "File uploaded"
    );

    Ok(Json(file.into()))
}
