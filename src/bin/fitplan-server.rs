// ABOUTME: FitPlan API server binary
// ABOUTME: Loads configuration, opens the store, wires auth and generation, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # FitPlan API Server Binary
//!
//! ```bash
//! FIREBASE_PROJECT_ID=my-project DEEPSEEK_API_KEY=sk-... cargo run --bin fitplan-server
//! cargo run --bin fitplan-server -- --http-port 9000 --store-url sqlite:./data/fitplan.db
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fitplan_server::{
    auth::firebase::FirebaseAuth,
    clock::SystemClock,
    config::ServerConfig,
    llm::{DeepSeekProvider, LlmProvider},
    logging::LoggingConfig,
    resources::ServerResources,
    server,
    store::factory::create_store,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "fitplan-server")]
#[command(about = "FitPlan API - workout and meal planning with progress tracking")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the document store URL (memory:// or sqlite:<path>)
    #[arg(long)]
    store_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    LoggingConfig::from_env().init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(store_url) = args.store_url {
        config.store.url = store_url;
    }

    info!("Starting FitPlan API server");
    info!("{}", config.summary());

    let store = create_store(&config.store.url)
        .await
        .with_context(|| format!("Failed to open document store at {}", config.store.url))?;
    info!(backend = store.backend_name(), "Document store ready");

    let verifier = Arc::new(FirebaseAuth::new(config.firebase.clone()));

    let llm: Option<Arc<dyn LlmProvider>> = if config.deepseek.is_configured() {
        match DeepSeekProvider::new(&config.deepseek) {
            Ok(provider) => Some(Arc::new(provider)),
            Err(e) => {
                warn!(error = %e, "Plan generation disabled");
                None
            }
        }
    } else {
        None
    };

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(
        Arc::new(config),
        store,
        Arc::new(SystemClock),
        verifier,
        llm,
    ));

    if let Err(e) = server::serve(resources, port).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
