//! Packhouse Storage Library
//!
//! Storage abstraction for uploaded files plus the local filesystem backend.
//!
//! # Storage key format
//!
//! Every upload is stored flat under the upload directory as
//! `{uuid}-{sanitized original name}`, so two uploads of the same file never
//! collide. Keys must not contain `..`, a path separator or a leading `/`.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{generate_storage_key, sanitize_filename};
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
