use crate::{LocalStorage, Storage, StorageResult};
use packhouse_core::constants::UPLOADS_URL_PREFIX;
use packhouse_core::Config;
use std::sync::Arc;

/// Create the upload storage backend from configuration.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let base_url = format!("{}{}", config.public_base_url(), UPLOADS_URL_PREFIX);
    let storage = LocalStorage::new(config.upload_dir(), base_url).await?;

    tracing::info!(
        upload_dir = %config.upload_dir(),
        "Local upload storage initialized"
    );

    Ok(Arc::new(storage))
}
