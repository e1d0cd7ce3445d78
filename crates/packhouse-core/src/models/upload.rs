use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub url: String,
}

/// A file accepted by the upload handler. Only the bytes on disk persist.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub original_name: String,
    pub storage_name: String,
    pub url: String,
}

impl From<UploadedFile> for UploadResponse {
    fn from(file: UploadedFile) -> Self {
        UploadResponse { url: file.url }
    }
}
