//! Upload storage setup

use anyhow::{Context, Result};
use packhouse_core::Config;
use packhouse_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .with_context(|| format!("Failed to initialize upload directory {}", config.upload_dir()))?;

    tracing::info!(
        public_base_url = %config.public_base_url(),
        max_upload_mb = config.max_upload_size_bytes() / 1024 / 1024,
        "Upload storage ready"
    );

    Ok(storage)
}
