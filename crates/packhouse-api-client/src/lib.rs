//! Shared HTTP client for the Packhouse API.
//!
//! Provides a minimal client with generic GET/POST/DELETE helpers, domain
//! methods for orders, packers and notifications, and the font loader used
//! when building PDF reports. The CLI uses this client directly.

pub mod api;
pub mod fonts;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the Packhouse API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: PACKHOUSE_API_URL (or API_URL).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PACKHOUSE_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:4000".to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.build_url(path))
            .send()
            .await
            .context("Failed to send request")?;

        parse_json(ensure_success(response).await?).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.build_url(path))
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        parse_json(ensure_success(response).await?).await
    }

    /// DELETE request. Returns Ok(()) on success.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.build_url(path))
            .send()
            .await
            .context("Failed to send request")?;

        ensure_success(response).await?;
        Ok(())
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(anyhow::anyhow!(
        "API request failed with status {}: {}",
        status,
        error_text
    ))
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .await
        .context("Failed to parse response as JSON")
}

pub use fonts::{FontBundle, FontLoader};
pub use packhouse_core::models::{NotificationResponse, Order, OrderStatus, OrderSummary, Packer};
