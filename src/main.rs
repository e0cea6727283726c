// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use std::{env, path::PathBuf, sync::Arc};
use thumbnail_studio::{
    api::{start_server, AppState},
    config::AppConfig,
    prediction::ReplicateClient,
    version,
};
use tokio::signal;

/// Thumbnail Studio API server
#[derive(Parser, Debug)]
#[command(name = "thumbnail-studio")]
#[command(about = "Generate and inpaint thumbnails through a prediction API", long_about = None)]
struct Args {
    /// HTTP listen port (overrides API_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Directory mask previews are written to (overrides MASK_PREVIEW_DIR)
    #[arg(long)]
    preview_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    tracing::info!("Starting {}", version::get_version_string());

    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.api_port = port;
    }
    if let Some(dir) = args.preview_dir {
        config.mask_preview_dir = dir;
    }
    config.validate().map_err(|e| anyhow!(e))?;

    if config.inpaint_model.is_none() {
        tracing::warn!("INPAINT_MODEL_VERSION not set; /api/edit will return 503");
    }

    // validate() guarantees the token is present
    let token = config.api_token.clone().unwrap_or_default();
    let client = ReplicateClient::new(&config.prediction_api_base, &token)?;
    let state = AppState::from_config(&config, Arc::new(client)).map_err(|e| anyhow!(e))?;

    tracing::info!(
        "Prediction API: {} (poll every {}ms, max {} attempts)",
        config.prediction_api_base,
        config.poll_interval_ms,
        config.max_poll_attempts
    );

    let port = config.api_port;
    tokio::select! {
        result = start_server(state, port) => result?,
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, stopping server");
        }
    }

    Ok(())
}
