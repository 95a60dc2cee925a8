// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use bert_vector_node::{
    api::{start_server, AppState},
    cli::Cli,
    embeddings::load_model,
    version,
};
use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize tracing subscriber for logging (RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    info!("🚀 Starting {}", version::get_version_string());

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Invalid configuration: {:#}", e);
            std::process::exit(2);
        }
    };

    // Model must be in memory before the port opens; no fallback
    info!(model_dir = %config.model.model_dir.display(), "🧠 Loading BERT model...");
    let model = match load_model(&config.model).await {
        Ok(model) => model,
        Err(e) => {
            error!("❌ {:#}", e);
            error!("   The service cannot start without its model directory.");
            std::process::exit(1);
        }
    };
    info!(
        "✅ Model ready: {} ({}D)",
        model.model_name(),
        model.hidden_size()
    );

    let state = AppState::new(model);
    start_server(config.listen_addr(), state).await?;

    info!("👋 Goodbye!");
    Ok(())
}
