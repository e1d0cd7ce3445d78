//! Font assets for PDF reports.
//!
//! The report renderer embeds fonts as base64 text, so both faces are fetched
//! and encoded together. Nothing is cached; every `load` goes to the network.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_FONT_BASE_URL: &str =
    "https://raw.githubusercontent.com/notofonts/notofonts.github.io/main/fonts/NotoSans/hinted/ttf";
pub const REGULAR_FONT_FILE: &str = "NotoSans-Regular.ttf";
pub const BOLD_FONT_FILE: &str = "NotoSans-Bold.ttf";

/// Both faces, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontBundle {
    pub regular: String,
    pub bold: String,
}

#[derive(Clone, Debug)]
pub struct FontLoader {
    client: Client,
    base_url: String,
}

impl FontLoader {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// FONT_BASE_URL, or the public Noto Sans location.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("FONT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_FONT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Fetch both faces concurrently. Fails as a whole if either fetch fails.
    pub async fn load(&self) -> Result<FontBundle> {
        let (regular, bold) = futures::try_join!(
            self.fetch_encoded(REGULAR_FONT_FILE),
            self.fetch_encoded(BOLD_FONT_FILE),
        )?;

        Ok(FontBundle { regular, bold })
    }

    async fn fetch_encoded(&self, file: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, file);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch font {}", file))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Font request for {} failed with status {}",
                file,
                status
            ));
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read font {}", file))?;
        tracing::debug!(file, size_bytes = bytes.len(), "Fetched font");

        Ok(STANDARD.encode(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_encodes_both_faces() {
        let mut server = mockito::Server::new_async().await;
        let regular = server
            .mock("GET", "/fonts/NotoSans-Regular.ttf")
            .with_status(200)
            .with_body(b"regular-bytes")
            .create_async()
            .await;
        let bold = server
            .mock("GET", "/fonts/NotoSans-Bold.ttf")
            .with_status(200)
            .with_body(b"bold-bytes")
            .create_async()
            .await;

        let loader = FontLoader::new(format!("{}/fonts/", server.url())).unwrap();
        let bundle = loader.load().await.unwrap();

        regular.assert_async().await;
        bold.assert_async().await;
        assert_eq!(bundle.regular, STANDARD.encode(b"regular-bytes"));
        assert_eq!(bundle.bold, STANDARD.encode(b"bold-bytes"));
    }

    #[tokio::test]
    async fn test_load_fails_when_one_face_is_missing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/NotoSans-Regular.ttf")
            .with_status(200)
            .with_body(b"regular-bytes")
            .create_async()
            .await;
        server
            .mock("GET", "/NotoSans-Bold.ttf")
            .with_status(404)
            .create_async()
            .await;

        let loader = FontLoader::new(server.url()).unwrap();
        let err = loader.load().await.unwrap_err();

        assert!(err.to_string().contains("NotoSans-Bold.ttf"));
    }

    #[tokio::test]
    async fn test_every_load_refetches() {
        let mut server = mockito::Server::new_async().await;
        let regular = server
            .mock("GET", "/NotoSans-Regular.ttf")
            .with_status(200)
            .with_body(b"r")
            .expect(2)
            .create_async()
            .await;
        let bold = server
            .mock("GET", "/NotoSans-Bold.ttf")
            .with_status(200)
            .with_body(b"b")
            .expect(2)
            .create_async()
            .await;

        let loader = FontLoader::new(server.url()).unwrap();
        loader.load().await.unwrap();
        loader.load().await.unwrap();

        regular.assert_async().await;
        bold.assert_async().await;
    }
}
