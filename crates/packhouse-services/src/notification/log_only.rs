use async_trait::async_trait;
use packhouse_core::models::MessageChannel;
use uuid::Uuid;

use super::{MessageSender, NotificationError};

/// Logs the message instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlySender;

#[async_trait]
impl MessageSender for LogOnlySender {
    async fn send(
        &self,
        channel: MessageChannel,
        to: &str,
        body: &str,
    ) -> Result<String, NotificationError> {
        let message_id = format!("log-{}", Uuid::new_v4());
        tracing::info!(
            channel = %channel,
            to = %to,
            message_id = %message_id,
            body_len = body.len(),
            "Notification mode is 'log'; message not dispatched"
        );
        tracing::debug!(body = %body, "Logged message body");
        Ok(message_id)
    }
}
