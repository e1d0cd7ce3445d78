//! Storage key generation.

use uuid::Uuid;

const MAX_FILENAME_LEN: usize = 200;

/// Reduce a client supplied file name to a safe single path segment.
///
/// Directory components are stripped, names longer than 200 characters keep
/// their last 200, and anything outside `[A-Za-z0-9._-]` becomes `_`. Names
/// that end up empty become `file`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    // Long names lose their head, so the extension stays the suffix.
    let skip = base.chars().count().saturating_sub(MAX_FILENAME_LEN);
    let sanitized: String = base
        .chars()
        .skip(skip)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.trim_start_matches('.');
    if sanitized.is_empty() || sanitized.contains("..") {
        "file".to_string()
    } else {
        sanitized.to_string()
    }
}

/// `{uuid}-{sanitized original}`
pub fn generate_storage_key(original_filename: &str) -> String {
    format!("{}-{}", Uuid::new_v4(), sanitize_filename(original_filename))
}
