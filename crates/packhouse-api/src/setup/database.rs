//! Document store setup and initialization

use crate::state::DocumentState;
use anyhow::{Context, Result};
use packhouse_core::{Config, DocumentStoreBackend};
use packhouse_db::{InMemoryDocumentStore, PostgresOrderRepository, PostgresPackerRepository};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Connect the configured document store.
pub async fn setup_document_store(config: &Config) -> Result<DocumentState> {
    match config.document_store() {
        DocumentStoreBackend::Postgres => {
            let pool = setup_database(config).await?;
            Ok(DocumentState {
                packers: Arc::new(PostgresPackerRepository::new(pool.clone())),
                orders: Arc::new(PostgresOrderRepository::new(pool)),
            })
        }
        DocumentStoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on restart");
            let store = InMemoryDocumentStore::new();
            Ok(DocumentState {
                packers: Arc::new(store.clone()),
                orders: Arc::new(store),
            })
        }
    }
}

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url()
        .context("DATABASE_URL must be set for the postgres document store")?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Database connected successfully"
    );

    // Workspace migrations/ relative to this crate
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
