// HTTP request handlers
use crate::application::error::SampleServiceError;
use crate::domain::abundance::SampleSeries;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List sample names
pub async fn list_sample_names(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, SampleServiceError> {
    Ok(Json(state.sample_service.list_sample_names().await?))
}

/// List OTU descriptions
pub async fn list_otu_descriptions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, SampleServiceError> {
    Ok(Json(state.sample_service.list_otu_descriptions().await?))
}

/// Metadata for a sample, or `{}` when it has none
pub async fn sample_metadata(
    Path(sample): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, SampleServiceError> {
    let response = match state.sample_service.get_sample_metadata(&sample).await? {
        Some(metadata) => Json(metadata).into_response(),
        None => Json(Value::Object(Map::new())).into_response(),
    };
    Ok(response)
}

/// Weekly wash frequency of a sample as a bare integer
pub async fn sample_wash_frequency(
    Path(sample): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<i64>, SampleServiceError> {
    Ok(Json(
        state.sample_service.get_weekly_wash_frequency(&sample).await?,
    ))
}

/// OTU ids and counts of a sample, wrapped in a single-element array
pub async fn sample_series(
    Path(sample): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<[SampleSeries; 1]>, SampleServiceError> {
    let series = state.sample_service.get_sample_series(&sample).await?;
    Ok(Json([series]))
}
