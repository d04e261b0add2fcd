//! Fishpond Server - water-quality prediction API
//!
//! HTTP front end for `fishpond-core`:
//!
//! - `GET /` liveness string
//! - `POST /predict` classify one sensor reading and return advisories

pub mod http;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fishpond_core::Classifier;

/// Shared application state
///
/// Built once at startup; nothing in here changes afterwards, so handlers
/// read it without locking.
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::health))
        .route("/predict", post(http::predict))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Fishpond server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
