//! Service construction and state assembly

use crate::state::{AppState, DocumentState, NotificationState, UploadState};
use anyhow::{Context, Result};
use packhouse_core::Config;
use packhouse_services::{EventBroadcaster, LowStockAlerter, NotificationService};
use packhouse_storage::Storage;
use std::sync::Arc;
use std::time::Duration;

/// Create the notification service for the configured mode and assemble state.
pub fn initialize_services(
    config: &Config,
    documents: DocumentState,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let notifications = NotificationService::from_config(config)
        .context("Failed to initialize notification service")?;

    Ok(build_state(config, documents, storage, notifications))
}

/// Assemble `AppState` from already constructed parts.
pub fn build_state(
    config: &Config,
    documents: DocumentState,
    storage: Arc<dyn Storage>,
    notifications: NotificationService,
) -> Arc<AppState> {
    let alerter = LowStockAlerter::new(
        notifications.sender(),
        Duration::from_millis(config.alert_send_delay_ms()),
    );

    tracing::info!(
        alert_send_delay_ms = config.alert_send_delay_ms(),
        event_channel_capacity = config.event_channel_capacity(),
        "Services initialized"
    );

    Arc::new(AppState {
        documents,
        uploads: UploadState { storage },
        notifications: NotificationState {
            service: notifications,
            alerter: Arc::new(alerter),
        },
        events: EventBroadcaster::new(config.event_channel_capacity()),
        config: config.clone(),
    })
}
