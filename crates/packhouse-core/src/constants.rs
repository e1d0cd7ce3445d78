//! Shared constants.

/// Document collection holding packers.
pub const PACKERS_COLLECTION: &str = "packers";

/// Document collection holding orders (written by the order service).
pub const ORDERS_COLLECTION: &str = "orders";

/// URL prefix under which uploaded files are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Multipart field name carrying the uploaded file.
pub const UPLOAD_FIELD_NAME: &str = "file";
