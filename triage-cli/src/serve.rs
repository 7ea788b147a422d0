//! Server bootstrap for the `serve` subcommand.

use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use triage_core::{HistoryLedger, LabelRegistry, PredictionPipeline};
use triage_http::{HttpRuntimeConfig, TriageRuntime};
use triage_infer::RestClassifier;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

pub struct ServeOptions {
    pub bind: String,
    pub model_url: String,
    pub inference_timeout_secs: u64,
    pub no_openapi: bool,
}

pub fn run_serve(options: ServeOptions) -> Result<(), ServeError> {
    let runtime = tokio::runtime::Runtime::new().map_err(ServeError::Runtime)?;
    runtime.block_on(serve(options))
}

async fn serve(options: ServeOptions) -> Result<(), ServeError> {
    let registry = LabelRegistry::new();
    info!(
        classes = registry.len(),
        model_url = %options.model_url,
        "starting symptom triage service"
    );

    let classifier = RestClassifier::new(options.model_url)
        .with_timeout(Duration::from_secs(options.inference_timeout_secs));
    let pipeline = PredictionPipeline::new(Box::new(classifier), registry, HistoryLedger::new());

    let config = HttpRuntimeConfig {
        enable_openapi: !options.no_openapi,
        ..HttpRuntimeConfig::default()
    };
    let app = TriageRuntime::new(pipeline).router_with_config(config);

    let listener = TcpListener::bind(&options.bind)
        .await
        .map_err(|source| ServeError::Bind {
            addr: options.bind.clone(),
            source,
        })?;
    info!(addr = %options.bind, "listening");

    axum::serve(listener, app).await.map_err(ServeError::Serve)
}
