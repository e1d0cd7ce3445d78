//! Configuration module
//!
//! This module provides configuration structures for the API and services,
//! including document store, upload storage, messaging provider and alert settings.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::store_types::DocumentStoreBackend;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const SERVER_PORT: u16 = 4000;

/// Whether notifications are handed to the messaging provider or only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationMode {
    /// Dispatch through the messaging provider.
    Live,
    /// Log the message and return a synthetic message id.
    Log,
}

impl FromStr for NotificationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(NotificationMode::Live),
            "log" => Ok(NotificationMode::Log),
            _ => Err(anyhow::anyhow!(
                "Invalid NOTIFICATION_MODE '{}': expected 'live' or 'log'",
                s
            )),
        }
    }
}

impl Display for NotificationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NotificationMode::Live => write!(f, "live"),
            NotificationMode::Log => write!(f, "log"),
        }
    }
}

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

/// Full Packhouse configuration
#[derive(Clone, Debug)]
pub struct PackhouseConfig {
    pub base: BaseConfig,
    // Document store
    pub document_store: DocumentStoreBackend,
    pub database_url: Option<String>,
    // Uploads
    pub upload_dir: String,
    pub public_base_url: String,
    pub max_upload_size_bytes: usize,
    // Messaging provider
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_phone_number: Option<String>,
    pub twilio_api_base: String,
    pub admin_phone_number: Option<String>,
    pub notification_mode: NotificationMode,
    // Alerts and realtime events
    pub alert_send_delay_ms: u64,
    pub event_channel_capacity: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<PackhouseConfig>);

impl Config {
    fn inner(&self) -> &PackhouseConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_environment(&self.inner().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = PackhouseConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn document_store(&self) -> DocumentStoreBackend {
        self.inner().document_store
    }

    pub fn database_url(&self) -> Option<&str> {
        self.inner().database_url.as_deref()
    }

    pub fn upload_dir(&self) -> &str {
        &self.inner().upload_dir
    }

    pub fn public_base_url(&self) -> &str {
        &self.inner().public_base_url
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().max_upload_size_bytes
    }

    pub fn twilio_account_sid(&self) -> Option<&str> {
        self.inner().twilio_account_sid.as_deref()
    }

    pub fn twilio_auth_token(&self) -> Option<&str> {
        self.inner().twilio_auth_token.as_deref()
    }

    pub fn twilio_phone_number(&self) -> Option<&str> {
        self.inner().twilio_phone_number.as_deref()
    }

    pub fn twilio_api_base(&self) -> &str {
        &self.inner().twilio_api_base
    }

    pub fn admin_phone_number(&self) -> Option<&str> {
        self.inner().admin_phone_number.as_deref()
    }

    pub fn notification_mode(&self) -> NotificationMode {
        self.inner().notification_mode
    }

    pub fn alert_send_delay_ms(&self) -> u64 {
        self.inner().alert_send_delay_ms
    }

    pub fn event_channel_capacity(&self) -> usize {
        self.inner().event_channel_capacity
    }
}

fn megabytes_to_bytes(megabytes: usize) -> Result<usize, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", megabytes))
}

fn is_production_environment(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

impl PackhouseConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        const MAX_UPLOAD_SIZE_MB: usize = 25;
        const ALERT_SEND_DELAY_MS: u64 = 1000;
        const EVENT_CHANNEL_CAPACITY: usize = 256;

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());
        let is_production = is_production_environment(&environment);

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| SERVER_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let base = BaseConfig {
            server_port,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
        };

        let document_store = match non_empty_var("DOCUMENT_STORE") {
            Some(value) => value.parse()?,
            None => DocumentStoreBackend::Postgres,
        };

        // The original deployment only dispatched real messages in production.
        let notification_mode = match non_empty_var("NOTIFICATION_MODE") {
            Some(value) => value.parse()?,
            None if is_production => NotificationMode::Live,
            None => NotificationMode::Log,
        };

        let config = PackhouseConfig {
            base,
            document_store,
            database_url: non_empty_var("DATABASE_URL"),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            public_base_url: non_empty_var("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{}", server_port))
                .trim_end_matches('/')
                .to_string(),
            max_upload_size_bytes: megabytes_to_bytes(
                env::var("MAX_UPLOAD_SIZE_MB")
                    .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
                    .parse::<usize>()
                    .unwrap_or(MAX_UPLOAD_SIZE_MB),
            )?,
            twilio_account_sid: non_empty_var("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: non_empty_var("TWILIO_AUTH_TOKEN"),
            twilio_phone_number: non_empty_var("TWILIO_PHONE_NUMBER"),
            twilio_api_base: non_empty_var("TWILIO_API_BASE")
                .unwrap_or_else(|| "https://api.twilio.com".to_string()),
            admin_phone_number: non_empty_var("ADMIN_PHONE_NUMBER"),
            notification_mode,
            alert_send_delay_ms: env::var("ALERT_SEND_DELAY_MS")
                .unwrap_or_else(|_| ALERT_SEND_DELAY_MS.to_string())
                .parse()
                .unwrap_or(ALERT_SEND_DELAY_MS),
            event_channel_capacity: env::var("EVENT_CHANNEL_CAPACITY")
                .unwrap_or_else(|_| EVENT_CHANNEL_CAPACITY.to_string())
                .parse::<usize>()
                .unwrap_or(EVENT_CHANNEL_CAPACITY)
                .max(1),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.document_store == DocumentStoreBackend::Postgres {
            match self.database_url.as_deref() {
                None => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be set when using the postgres document store"
                    ))
                }
                Some(url) if !url.starts_with("postgresql://") && !url.starts_with("postgres://") => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ))
                }
                Some(_) => {}
            }
        }

        if self.notification_mode == NotificationMode::Live
            && (self.twilio_account_sid.is_none()
                || self.twilio_auth_token.is_none()
                || self.twilio_phone_number.is_none())
        {
            return Err(anyhow::anyhow!(
                "NOTIFICATION_MODE=live requires TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and TWILIO_PHONE_NUMBER"
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PackhouseConfig {
        PackhouseConfig {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec!["*".to_string()],
                db_max_connections: 5,
                db_timeout_seconds: 5,
                environment: "development".to_string(),
            },
            document_store: DocumentStoreBackend::Memory,
            database_url: None,
            upload_dir: "uploads".to_string(),
            public_base_url: "http://localhost:4000".to_string(),
            max_upload_size_bytes: 1024,
            twilio_account_sid: None,
            twilio_auth_token: None,
            twilio_phone_number: None,
            twilio_api_base: "https://api.twilio.com".to_string(),
            admin_phone_number: None,
            notification_mode: NotificationMode::Log,
            alert_send_delay_ms: 0,
            event_channel_capacity: 16,
        }
    }

    #[test]
    fn memory_store_in_log_mode_needs_nothing_else() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn postgres_store_requires_database_url() {
        let mut config = sample();
        config.document_store = DocumentStoreBackend::Postgres;
        assert!(config.validate().is_err());

        config.database_url = Some("mysql://localhost/db".to_string());
        assert!(config.validate().is_err());

        config.database_url = Some("postgresql://localhost/packhouse".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn live_mode_requires_provider_credentials() {
        let mut config = sample();
        config.notification_mode = NotificationMode::Live;
        assert!(config.validate().is_err());

        config.twilio_account_sid = Some("AC123".to_string());
        config.twilio_auth_token = Some("token".to_string());
        config.twilio_phone_number = Some("+15550001111".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn notification_mode_parses() {
        assert_eq!("LIVE".parse::<NotificationMode>().unwrap(), NotificationMode::Live);
        assert_eq!(" log ".parse::<NotificationMode>().unwrap(), NotificationMode::Log);
        assert!("stub".parse::<NotificationMode>().is_err());
    }

    #[test]
    fn upload_limit_overflow_is_an_error() {
        assert_eq!(megabytes_to_bytes(25).unwrap(), 25 * 1024 * 1024);
        assert!(megabytes_to_bytes(usize::MAX).is_err());
    }

    #[test]
    fn production_detection() {
        let mut config = sample();
        config.base.environment = "Prod".to_string();
        assert!(Config(Box::new(config)).is_production());
        assert!(!Config(Box::new(sample())).is_production());
    }
}
