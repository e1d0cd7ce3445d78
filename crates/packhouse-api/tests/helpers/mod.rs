//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs in-process: the in-memory document store, local storage in
//! a temp directory and a `RecordingSender` standing in for the provider.

use async_trait::async_trait;
use axum_test::TestServer;
use packhouse_api::setup::{routes, services};
use packhouse_api::state::{AppState, DocumentState};
use packhouse_core::models::MessageChannel;
use packhouse_core::{
    BaseConfig, Config, DocumentStoreBackend, NotificationMode, PackhouseConfig,
};
use packhouse_db::InMemoryDocumentStore;
use packhouse_services::{MessageSender, NotificationError, NotificationService};
use packhouse_storage::{LocalStorage, Storage};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const ADMIN_PHONE: &str = "+15550000000";

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub channel: MessageChannel,
    pub to: String,
    pub body: String,
}

/// Provider stand-in that records every message, or rejects them all.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<SentMessage>>,
    reject_with: Option<String>,
}

impl RecordingSender {
    pub fn rejecting(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_with: Some(message.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(
        &self,
        channel: MessageChannel,
        to: &str,
        body: &str,
    ) -> Result<String, NotificationError> {
        if let Some(message) = &self.reject_with {
            return Err(NotificationError::Provider {
                status: 400,
                message: message.clone(),
            });
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMessage {
            channel,
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(format!("SM{:04}", sent.len()))
    }
}

pub fn test_config(upload_dir: &Path, admin_phone: Option<&str>) -> Config {
    Config(Box::new(PackhouseConfig {
        base: BaseConfig {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 5,
            db_timeout_seconds: 5,
            environment: "test".to_string(),
        },
        document_store: DocumentStoreBackend::Memory,
        database_url: None,
        upload_dir: upload_dir.to_string_lossy().to_string(),
        public_base_url: "http://localhost:4000".to_string(),
        max_upload_size_bytes: 1024 * 1024,
        twilio_account_sid: Some("AC_test".to_string()),
        twilio_auth_token: Some("test-token".to_string()),
        twilio_phone_number: Some("+15550001111".to_string()),
        twilio_api_base: "http://127.0.0.1:9".to_string(),
        admin_phone_number: admin_phone.map(String::from),
        notification_mode: NotificationMode::Live,
        alert_send_delay_ms: 0,
        event_channel_capacity: 16,
    }))
}

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub store: InMemoryDocumentStore,
    pub sender: Arc<RecordingSender>,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files written to the upload directory.
    pub fn uploaded_file_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path()).unwrap().count()
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(RecordingSender::default(), Some(ADMIN_PHONE)).await
}

pub async fn setup_test_app_with(sender: RecordingSender, admin_phone: Option<&str>) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(upload_dir.path(), admin_phone);

    let store = InMemoryDocumentStore::new();
    let documents = DocumentState {
        packers: Arc::new(store.clone()),
        orders: Arc::new(store.clone()),
    };

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(upload_dir.path(), "http://localhost:4000/uploads".to_string())
            .await
            .expect("Failed to create local storage"),
    );

    let sender = Arc::new(sender);
    let notifications = NotificationService::new(
        sender.clone(),
        config.notification_mode(),
        config.admin_phone_number().map(String::from),
    );

    let state = services::build_state(&config, documents, storage, notifications);
    let router = routes::setup_routes(&config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        state,
        store,
        sender,
        upload_dir,
    }
}
