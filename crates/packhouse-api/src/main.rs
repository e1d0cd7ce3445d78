use packhouse_api::setup;
use packhouse_core::Config;
use packhouse_infra::{init_telemetry, LogFormat};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let log_format = if config.is_production() {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_telemetry(log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        document_store = %config.document_store(),
        notification_mode = %config.notification_mode(),
        "Configuration loaded and validated successfully"
    );

    let (_state, router) = setup::initialize_app(config.clone()).await?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}
