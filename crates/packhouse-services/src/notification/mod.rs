//! Text message dispatch.
//!
//! `MessageSender` is the seam between the handlers and the messaging
//! provider. `TwilioClient` talks to the provider, `LogOnlySender` only logs
//! and is what non-production deployments run with.

mod log_only;
mod twilio;

pub use log_only::LogOnlySender;
pub use twilio::{TwilioClient, TwilioCredentials};

use async_trait::async_trait;
use packhouse_core::models::MessageChannel;
use packhouse_core::{AppError, Config, NotificationMode};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    /// The provider answered with a non-success status.
    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error("Messaging provider unreachable: {0}")]
    Transport(String),

    #[error("Messaging provider not configured: {0}")]
    NotConfigured(String),

    #[error("No recipient: pass 'to' or set ADMIN_PHONE_NUMBER")]
    MissingRecipient,
}

impl From<reqwest::Error> for NotificationError {
    fn from(err: reqwest::Error) -> Self {
        NotificationError::Transport(err.to_string())
    }
}

impl From<NotificationError> for AppError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::MissingRecipient => AppError::InvalidInput(err.to_string()),
            NotificationError::NotConfigured(_) => AppError::Internal(err.to_string()),
            NotificationError::Provider { .. } | NotificationError::Transport(_) => {
                AppError::Provider(err.to_string())
            }
        }
    }
}

/// Something that can deliver a text message and return the provider's id.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(
        &self,
        channel: MessageChannel,
        to: &str,
        body: &str,
    ) -> Result<String, NotificationError>;
}

/// Notification facade held in application state.
#[derive(Clone)]
pub struct NotificationService {
    sender: Arc<dyn MessageSender>,
    mode: NotificationMode,
    admin_phone_number: Option<String>,
}

impl NotificationService {
    pub fn new(
        sender: Arc<dyn MessageSender>,
        mode: NotificationMode,
        admin_phone_number: Option<String>,
    ) -> Self {
        Self {
            sender,
            mode,
            admin_phone_number,
        }
    }

    /// Pick the sender for the configured mode.
    pub fn from_config(config: &Config) -> Result<Self, NotificationError> {
        let sender: Arc<dyn MessageSender> = match config.notification_mode() {
            NotificationMode::Live => {
                let credentials = TwilioCredentials::from_config(config)?;
                Arc::new(TwilioClient::new(config.twilio_api_base(), credentials)?)
            }
            NotificationMode::Log => Arc::new(LogOnlySender),
        };

        tracing::info!(mode = %config.notification_mode(), "Notification service initialized");

        Ok(Self::new(
            sender,
            config.notification_mode(),
            config.admin_phone_number().map(String::from),
        ))
    }

    pub fn mode(&self) -> NotificationMode {
        self.mode
    }

    pub fn sender(&self) -> Arc<dyn MessageSender> {
        self.sender.clone()
    }

    /// Explicit recipient if given, otherwise the configured admin number.
    pub fn alert_recipient(&self, to: Option<&str>) -> Result<String, NotificationError> {
        to.map(str::trim)
            .filter(|s| !s.is_empty())
            .or(self.admin_phone_number.as_deref())
            .map(String::from)
            .ok_or(NotificationError::MissingRecipient)
    }

    #[tracing::instrument(skip(self, body), fields(channel = %channel, mode = %self.mode))]
    pub async fn send(
        &self,
        channel: MessageChannel,
        to: &str,
        body: &str,
    ) -> Result<String, NotificationError> {
        match self.sender.send(channel, to, body).await {
            Ok(message_id) => {
                tracing::info!(message_id = %message_id, "Message dispatched");
                Ok(message_id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Message dispatch failed");
                Err(e)
            }
        }
    }
}
