//! Process metrics endpoint

use axum::{extract::State, response::Response};

use crate::error::Result;
use crate::state::AppState;

use super::exposition;

/// Serve the exporter's own metrics (build information)
pub async fn process_metrics(State(state): State<AppState>) -> Result<Response> {
    exposition(state.process_registry())
}
