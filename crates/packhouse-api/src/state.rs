//! Application state and sub-state extractors.
//!
//! Handlers extract only the sub-state they need (`State<DocumentState>`,
//! `State<EventState>`, ...) through `FromRef`; `/health` takes the whole
//! `State<Arc<AppState>>`.

use packhouse_core::Config;
use packhouse_db::{OrderRepository, PackerRepository};
use packhouse_services::{EventBroadcaster, LowStockAlerter, NotificationService};
use packhouse_storage::Storage;
use std::sync::Arc;

/// Packer and order collections.
#[derive(Clone)]
pub struct DocumentState {
    pub packers: Arc<dyn PackerRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

#[derive(Clone)]
pub struct UploadState {
    pub storage: Arc<dyn Storage>,
}

#[derive(Clone)]
pub struct NotificationState {
    pub service: NotificationService,
    pub alerter: Arc<LowStockAlerter>,
}

pub struct AppState {
    pub documents: DocumentState,
    pub uploads: UploadState,
    pub notifications: NotificationState,
    pub events: EventBroadcaster,
    pub config: Config,
}

/// Realtime fan-out handle for handlers that publish or stream events.
#[derive(Clone)]
pub struct EventState(pub EventBroadcaster);

impl axum::extract::FromRef<Arc<AppState>> for DocumentState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.documents.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for UploadState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.uploads.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for NotificationState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.notifications.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for EventState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        EventState(state.events.clone())
    }
}
