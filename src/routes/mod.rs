//! Route modules for the OSS exporter

pub mod health;
pub mod index;
pub mod metrics;
pub mod probe;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use prometheus::Registry;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, Result};
use crate::exporter;
use crate::state::AppState;

/// Build the application router on the configured paths
pub fn app(state: AppState) -> Router {
    let web = state.config().web.clone();

    Router::new()
        .route("/", get(index::landing_page))
        .route("/health", get(health::health_check))
        .route(&web.metrics_path, get(metrics::process_metrics))
        .route(&web.probe_path, get(probe::probe))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Respond with a registry in the text exposition format
fn exposition(registry: &Registry) -> Result<Response> {
    let body = exporter::encode(registry)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, exporter::CONTENT_TYPE)
        .body(Body::from(body))
        .map_err(|e| AppError::Internal(e.to_string()))
}
