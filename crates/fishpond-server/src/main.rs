//! Fishpond Server Binary
//!
//! Loads the classifier artifact and serves the prediction API. A missing or
//! corrupt artifact stops the process before the listener is bound.

use std::sync::Arc;

use fishpond_core::{ServerConfig, TreeEnsemble};
use fishpond_server::{serve, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let classifier = TreeEnsemble::load(&config.model_path).map_err(|e| {
        tracing::error!("Cannot start without a classifier: {}", e);
        e
    })?;
    tracing::info!(
        "Loaded classifier from {:?} ({} estimators)",
        config.model_path,
        classifier.n_estimators()
    );

    let state = Arc::new(AppState::new(Arc::new(classifier)));
    serve(&config.bind_addr, state).await
}
