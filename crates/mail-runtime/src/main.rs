//! cipher-post: seal, open and fetch password-protected messages.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cp_01_envelope_codec::{validate_password, Envelope};
use cp_02_gateway_fetcher::{GatewayFetchApi, GatewayFetcher, HttpGatewayTransport};
use mail_runtime::{decrypt_blocking, encrypt_blocking, parse_gateways, MailConfig};
use shared_types::ContentIdentifier;

/// Read when `--password` is not given, keeping it out of argv and history.
const PASSWORD_ENV: &str = "CP_PASSWORD";

/// cipher-post: password-sealed messages on content-addressed storage
#[derive(Parser, Debug)]
#[command(name = "cipher-post", version)]
#[command(about = "Seal, open and fetch password-protected message envelopes")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seal a message into envelope JSON
    Encrypt {
        /// Password to seal with (at least 8 characters)
        #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,

        /// Write the envelope here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Message text
        text: String,
    },

    /// Open an envelope JSON file
    Decrypt {
        /// Password the envelope was sealed with
        #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,

        /// Envelope file
        file: PathBuf,
    },

    /// Retrieve an envelope from the configured gateways
    Fetch {
        /// Content identifier
        cid: String,

        /// Gateway base URL; repeat to set the order (overrides CP_GATEWAYS)
        #[arg(short, long = "gateway")]
        gateways: Vec<String>,

        /// Open the envelope with this password instead of printing it
        #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only envelopes and plaintext
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Encrypt {
            password,
            out,
            text,
        } => {
            validate_password(&password)?;
            let envelope = encrypt_blocking(&text, &password).await?;
            let json = envelope.to_json()?;
            match out {
                Some(path) => {
                    tokio::fs::write(&path, &json)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Envelope written to {}", path.display());
                }
                None => println!("{}", String::from_utf8_lossy(&json)),
            }
        }

        Command::Decrypt { password, file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let envelope = Envelope::from_json(&bytes).context("Not a valid envelope")?;
            let text = decrypt_blocking(envelope, &password).await?;
            println!("{text}");
        }

        Command::Fetch {
            cid,
            gateways,
            password,
        } => {
            let mut config = MailConfig::from_env().context("Invalid CP_* configuration")?;
            if !gateways.is_empty() {
                config.endpoints = parse_gateways(&gateways.join(","))?;
            }
            let cid = ContentIdentifier::new(cid)?;

            let transport = HttpGatewayTransport::new(&config.fetcher)?;
            let fetcher = GatewayFetcher::with_config(transport, config.fetcher.clone())?;
            let report = fetcher.fetch_with_report(&cid, &config.endpoints).await?;
            info!(
                "Served by {} ({} gateway(s) failed first)",
                report.served_by,
                report.failures.len()
            );

            match password {
                Some(password) => {
                    let text = decrypt_blocking(report.envelope, &password).await?;
                    println!("{text}");
                }
                None => {
                    let json = report.envelope.to_json()?;
                    println!("{}", String::from_utf8_lossy(&json));
                }
            }
        }
    }

    Ok(())
}
