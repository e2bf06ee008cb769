//! ACOS Snapshot
//!
//! Pulls configuration and operational output from an ACOS device running
//! AxAPI v3.0 and prints it as a single JSON document on stdout.
//!
//! Configuration comes from environment variables: `ACOS_DEVICE`,
//! `ACOS_USERNAME`, `ACOS_PASSWORD` (required), `ACOS_VERBOSITY`,
//! `ACOS_TIMEOUT_SECS`, `ACOS_INSECURE`.

mod config;
mod error;
mod logging;
mod snapshot;

use anyhow::{Context, Result};
use axapi_client::AxapiClient;
use config::SnapshotConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = SnapshotConfig::from_env()?;
    logging::init(config.verbosity);

    info!("Starting ACOS snapshot");
    info!("Configuration:");
    info!("  Device: {}", config.client.host);
    info!("  Timeout: {:?}", config.client.timeout);
    info!("  Accept invalid certificates: {}", config.client.accept_invalid_certs);

    let mut client = AxapiClient::new(config.client)?;
    client
        .authenticate()
        .await
        .context("Please check your credentials and then try again")?;

    // Log off even when collection fails part way.
    let result = snapshot::collect(&client).await;
    client.deauthenticate().await;
    let snapshot = result?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
