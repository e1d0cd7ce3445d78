//! Multipart helpers for the upload handler

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use packhouse_core::constants::UPLOAD_FIELD_NAME;
use packhouse_core::AppError;

fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{}: {}", context, err.body_text()))
    } else {
        AppError::InvalidInput(format!("{}: {}", context, err.body_text()))
    }
}

/// Pull the bytes and original file name out of the `file` field.
/// Other fields are ignored; a second `file` field is rejected.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<(Vec<u8>, String), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart", e))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        if file_data.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        filename = field.file_name().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read file data", e))?;
        file_data = Some(data.to_vec());
    }

    let file_data = file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    let original_filename = filename
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "file".to_string());

    Ok((file_data, original_filename))
}
