//! contenthost-presign - presigned URLs for the contenthost object store.
//!
//! Signs upload, download and embed URLs for the configured bucket and
//! performs presigned deletes. Every command prints a single JSON document on
//! stdout; logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! contenthost-presign upload --filename clip.mp4 --content-type video/mp4 --size 1048576
//! contenthost-presign get videos/abc123def456.mp4 --expires 600
//! contenthost-presign embed videos/abc123def456.mp4
//! contenthost-presign delete videos/abc123def456.mp4
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `B2_BUCKET` | *(required)* | Bucket holding all media |
//! | `B2_REGION` | *(required)* | Signing region |
//! | `B2_ENDPOINT` | *(required)* | S3-compatible endpoint host |
//! | `B2_KEY_ID` | *(required)* | Application key id |
//! | `B2_APP_KEY` | *(required)* | Application key secret |
//! | `B2_PUBLIC_URL` | *(unset)* | Public base URL of the bucket |
//! | `SITE_URL` | `https://contenthosting.org` | Site serving embed pages |
//! | `UPLOAD_URL_EXPIRES` | `3600` | Upload URL lifetime in seconds |
//! | `DOWNLOAD_URL_EXPIRES` | `1800` | Download URL lifetime in seconds |
//! | `DELETE_URL_EXPIRES` | `60` | Delete URL lifetime in seconds |
//! | `EMBED_URL_EXPIRES` | `21600` | Embed URL lifetime in seconds |
//! | `STORE_REQUEST_TIMEOUT_SECS` | `30` | Timeout for requests to the store |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contenthost_core::{StoreConfig, media};
use contenthost_store::{DeleteOutcome, ObjectStoreClient};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "contenthost-presign", version)]
#[command(about = "Presigned URLs for the contenthost object store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan an upload and sign the PUT for it.
    Upload {
        /// Original filename, used for the extension.
        #[arg(long)]
        filename: String,
        /// Content type the uploader will send.
        #[arg(long)]
        content_type: String,
        /// Declared size in bytes.
        #[arg(long)]
        size: Option<u64>,
    },
    /// Sign a GET for an object.
    Get {
        /// Object key.
        key: String,
        /// Lifetime in seconds, defaults to the download expiry.
        #[arg(long)]
        expires: Option<u64>,
    },
    /// Sign a long-lived GET for an embed page.
    Embed {
        /// Object key.
        key: String,
    },
    /// Delete an object; a missing object counts as success.
    Delete {
        /// Object key.
        key: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadOutput {
    upload_url: String,
    file_id: String,
    key: String,
    content_type: String,
    expires_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetOutput {
    key: String,
    url: String,
    expires_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedOutput {
    key: String,
    url: String,
    expires_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_url: Option<String>,
    embed_url: String,
    embed_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteOutput {
    key: String,
    outcome: DeleteOutcome,
}

/// Initialize the tracing subscriber, writing to stderr.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Log level filter, falling back to `info` when `LOG_LEVEL` is unset or blank.
fn log_level(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "info".to_owned())
}

/// File id of an object key: its last path segment without the extension.
fn file_id_from_key(key: &str) -> &str {
    let name = key.rsplit('/').next().unwrap_or(key);
    name.split_once('.').map_or(name, |(stem, _)| stem)
}

async fn run(command: Command, config: &StoreConfig) -> Result<serde_json::Value> {
    let client = ObjectStoreClient::new(config).context("failed to build object store client")?;

    let value = match command {
        Command::Upload {
            filename,
            content_type,
            size,
        } => {
            let (plan, signed) = client.prepare_upload(&filename, &content_type, size)?;
            info!(key = %plan.key, file_id = %plan.file_id, "signed upload");
            serde_json::to_value(UploadOutput {
                upload_url: signed.url,
                file_id: plan.file_id,
                key: plan.key,
                content_type: plan.content_type,
                expires_at: signed.expires_at.to_rfc3339(),
            })?
        }
        Command::Get { key, expires } => {
            let signed = match expires {
                Some(secs) => client.get_url(&key, secs)?,
                None => client.download_url(&key)?,
            };
            serde_json::to_value(GetOutput {
                url: signed.url,
                expires_at: signed.expires_at.to_rfc3339(),
                key,
            })?
        }
        Command::Embed { key } => {
            let signed = client.embed_url(&key)?;
            let embed_url = media::embed_page_url(&config.site_url, file_id_from_key(&key));
            serde_json::to_value(EmbedOutput {
                url: signed.url,
                expires_at: signed.expires_at.to_rfc3339(),
                public_url: client.public_url(&key),
                embed_code: media::embed_code(&embed_url),
                embed_url,
                key,
            })?
        }
        Command::Delete { key } => {
            let outcome = client
                .delete_object(&key)
                .await
                .with_context(|| format!("failed to delete {key}"))?;
            info!(key = %key, ?outcome, "delete finished");
            serde_json::to_value(DeleteOutput { key, outcome })?
        }
    };

    Ok(value)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&log_level(std::env::var("LOG_LEVEL").ok()))?;
    let config = StoreConfig::from_env().context("failed to load configuration")?;

    let output = run(cli.command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
