//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use packhouse_core::Config;
use std::sync::Arc;

/// Build every dependency from configuration and wire the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let documents = database::setup_document_store(&config).await?;

    let storage = storage::setup_storage(&config).await?;

    let state = services::initialize_services(&config, documents, storage)?;

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
