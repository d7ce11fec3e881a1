//! Probe endpoint
//!
//! `GET /probe?bucket=<name>&prefix=<prefix>` walks the bucket listing and
//! answers with the probe gauges for that bucket/prefix combination.

use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::exporter;
use crate::listing::{self, ProbeQuery};
use crate::state::AppState;

use super::exposition;

/// Query parameters for a probe
#[derive(Debug, Deserialize)]
pub struct ProbeParams {
    /// Bucket to list; the configured bucket when absent or empty
    pub bucket: Option<String>,
    /// Key prefix filter (default: everything)
    #[serde(default)]
    pub prefix: String,
}

impl ProbeParams {
    pub fn into_query(self, default_bucket: &str) -> ProbeQuery {
        let bucket = self
            .bucket
            .filter(|bucket| !bucket.is_empty())
            .unwrap_or_else(|| default_bucket.to_string());
        ProbeQuery::new(bucket, self.prefix)
    }
}

/// Probe endpoint
///
/// Listing failures are not HTTP errors: they come back as `oss_list_success 0`.
pub async fn probe(
    State(state): State<AppState>,
    params: std::result::Result<Query<ProbeParams>, QueryRejection>,
) -> Result<Response> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let query = params.into_query(&state.config().storage.bucket);

    let start = Instant::now();
    let outcome = listing::probe(state.store(), &query).await;

    match &outcome {
        Ok(aggregate) => tracing::debug!(
            bucket = %query.bucket,
            prefix = %query.prefix,
            objects = aggregate.object_count,
            elapsed = ?start.elapsed(),
            "Probe complete"
        ),
        Err(e) => tracing::error!(
            bucket = %query.bucket,
            prefix = %query.prefix,
            error = %e,
            "Probe failed"
        ),
    }

    let registry = exporter::probe_registry(&query, &outcome)?;
    exposition(&registry)
}
