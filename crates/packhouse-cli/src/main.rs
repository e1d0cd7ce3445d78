//! Packhouse CLI: command-line client for the Packhouse API.
//!
//! Set PACKHOUSE_API_URL (or API_URL). Fonts come from FONT_BASE_URL.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use packhouse_api_client::{ApiClient, FontLoader};
use packhouse_cli::{init_tracing, render_orders_table};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "packhouse", about = "Packhouse API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all orders with totals per status
    Orders {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Packer operations
    Packers {
        #[command(subcommand)]
        sub: PackerCommands,
    },
    /// Send a WhatsApp message
    Notify {
        /// Destination phone number
        #[arg(long)]
        to: String,
        /// Message text
        #[arg(long)]
        message: String,
    },
    /// Fetch the report fonts as base64
    Fonts {
        /// Write the bundle here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum PackerCommands {
    /// List packers
    List,
    /// Create a packer
    Create {
        /// Packer name
        name: String,
        /// Extra fields as a JSON object
        #[arg(long)]
        fields: Option<String>,
    },
    /// Delete a packer by ID
    Delete {
        id: Uuid,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn packer_body(name: String, fields: Option<String>) -> anyhow::Result<serde_json::Value> {
    let mut body = match fields {
        Some(raw) => serde_json::from_str::<serde_json::Value>(&raw)
            .context("--fields must be valid JSON")?,
        None => serde_json::json!({}),
    };
    let object = body
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("--fields must be a JSON object"))?;
    object.insert("name".to_string(), serde_json::Value::String(name));
    Ok(body)
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Orders { format } => {
            let client = ApiClient::from_env()?;
            let orders = client
                .list_orders()
                .await
                .context("Failed to load orders")?;
            match format {
                OutputFormat::Json => print_json(&orders)?,
                OutputFormat::Table => print!("{}", render_orders_table(&orders)),
            }
        }
        Commands::Packers { sub } => {
            let client = ApiClient::from_env()?;
            match sub {
                PackerCommands::List => print_json(&client.list_packers().await?)?,
                PackerCommands::Create { name, fields } => {
                    let body = packer_body(name, fields)?;
                    print_json(&client.create_packer(&body).await?)?;
                }
                PackerCommands::Delete { id } => {
                    client.delete_packer(id).await?;
                    print_json(
                        &serde_json::json!({ "success": true, "message": format!("Packer {} deleted", id) }),
                    )?;
                }
            }
        }
        Commands::Notify { to, message } => {
            let client = ApiClient::from_env()?;
            print_json(&client.send_whatsapp(&to, &message).await?)?;
        }
        Commands::Fonts { output } => {
            let bundle = FontLoader::from_env()?.load().await?;
            match output {
                Some(path) => {
                    let json = serde_json::to_string(&bundle).context("Serialize font bundle")?;
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "Font bundle written");
                }
                None => print_json(&bundle)?,
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_body_merges_name_into_fields() {
        let body = packer_body("Asha".to_string(), Some(r#"{"shift":"night"}"#.to_string()))
            .unwrap();
        assert_eq!(body, serde_json::json!({"name": "Asha", "shift": "night"}));
    }

    #[test]
    fn packer_body_rejects_non_object_fields() {
        assert!(packer_body("Asha".to_string(), Some("[1,2]".to_string())).is_err());
    }

    #[test]
    fn cli_parses_orders_json() {
        let cli = Cli::try_parse_from(["packhouse", "orders", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Orders {
                format: OutputFormat::Json
            }
        ));
    }
}
