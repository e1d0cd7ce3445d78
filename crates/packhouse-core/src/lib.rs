//! Packhouse Core Library
//!
//! This crate provides core domain models, error types and configuration
//! shared across all Packhouse components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod store_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, NotificationMode, PackhouseConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use store_types::DocumentStoreBackend;
