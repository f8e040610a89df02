// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    health_check, list_otu_descriptions, list_sample_names, sample_metadata, sample_series,
    sample_wash_frequency,
};
use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

/// Build the router. `index_path` is the dashboard page served at `/`.
pub fn build_router(state: Arc<AppState>, index_path: impl AsRef<Path>) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(index_path))
        .route("/healthz", get(health_check))
        .route("/names", get(list_sample_names))
        .route("/otu", get(list_otu_descriptions))
        .route("/metadata/:sample", get(sample_metadata))
        .route("/wfreq/:sample", get(sample_wash_frequency))
        .route("/samples/:sample", get(sample_series))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
