//! Domain methods for the Packhouse API client.

use crate::ApiClient;
use anyhow::Result;
use packhouse_core::models::{NotificationResponse, Order, Packer, SendNotificationRequest};
use uuid::Uuid;

impl ApiClient {
    /// Fetch every order. No paging.
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.get("/orders").await
    }

    pub async fn list_packers(&self) -> Result<Vec<Packer>> {
        self.get("/packers").await
    }

    /// Create a packer from a JSON object of fields.
    pub async fn create_packer(&self, fields: &serde_json::Value) -> Result<Packer> {
        self.post_json("/packers", fields).await
    }

    pub async fn delete_packer(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/packers/{}", id)).await
    }

    /// Send one WhatsApp message through the API.
    pub async fn send_whatsapp(&self, to: &str, message: &str) -> Result<NotificationResponse> {
        let body = SendNotificationRequest {
            to: Some(to.to_string()),
            message: Some(message.to_string()),
        };
        self.post_json("/notifications/whatsapp", &body).await
    }
}
