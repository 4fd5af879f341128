//! PhishGuard Gateway
//!
//! Prediction-serving gateway for the URL and email phishing classifiers.
//! Artifacts load once at startup; the listener accepts requests
//! immediately and answers 503 for a pipeline until its artifacts are
//! published.

use anyhow::Result;
use clap::Parser;
use phishguard_classifiers::{load_email_pipeline, load_url_pipeline, Pipeline};
use phishguard_core::{Error, PipelineKind};
use phishguard_gateway::server::run_server;
use phishguard_gateway::{Cli, GatewayConfig, ServingState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting PhishGuard gateway");

    // Load configuration
    let config = GatewayConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    match &config.url_model {
        Some(paths) => info!(model = %paths.model.display(), "url pipeline configured"),
        None => info!("url pipeline not configured"),
    }
    match &config.email_model {
        Some(paths) => info!(model_dir = %paths.model_dir.display(), "email pipeline configured"),
        None => info!("email pipeline not configured"),
    }

    let addr = config.addr()?;

    // Artifacts load in the background; early requests get 503 until the
    // pipelines are published.
    let state = ServingState::new();
    spawn_artifact_loads(state.clone(), config);

    run_server(state, addr).await
}

/// Kick off the one-time artifact loads, one task per pipeline so a slow
/// or failing load of one never delays the other.
fn spawn_artifact_loads(state: ServingState, config: GatewayConfig) {
    match config.url_model {
        Some(paths) => {
            state.begin_loading(PipelineKind::Url);
            let state = state.clone();
            tokio::spawn(async move {
                let outcome = tokio::task::spawn_blocking(move || load_url_pipeline(&paths))
                    .await
                    .map_err(|e| Error::artifact("url classifier", e.to_string()))
                    .and_then(|loaded| loaded)
                    .map(|pipeline| Arc::new(pipeline) as Arc<dyn Pipeline>);
                state.publish(PipelineKind::Url, outcome);
            });
        }
        None => tracing::warn!("url model not configured; url pipeline stays unavailable"),
    }

    match config.email_model {
        Some(paths) => {
            state.begin_loading(PipelineKind::Email);
            tokio::spawn(async move {
                let outcome = tokio::task::spawn_blocking(move || load_email_pipeline(&paths))
                    .await
                    .map_err(|e| Error::artifact("email classifier", e.to_string()))
                    .and_then(|loaded| loaded)
                    .map(|pipeline| Arc::new(pipeline) as Arc<dyn Pipeline>);
                state.publish(PipelineKind::Email, outcome);
            });
        }
        None => tracing::warn!("email model not configured; email pipeline stays unavailable"),
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("phishguard=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("phishguard=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
