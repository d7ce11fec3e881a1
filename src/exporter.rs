//! Prometheus exposition of probe results
//!
//! Every probe gets a fresh registry, so nothing carries over between scrapes.

use prometheus::{GaugeVec, Opts, Registry, TextEncoder};

use crate::error::ListError;
use crate::listing::{Aggregate, ProbeQuery};

/// Metric name prefix for probe series
pub const NAMESPACE: &str = "oss";

/// Content type of the text exposition format
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

const PROBE_LABELS: [&str; 2] = ["bucket", "prefix"];

struct Series {
    name: &'static str,
    help: &'static str,
}

const LIST_SUCCESS: Series = Series {
    name: "list_success",
    help: "If the ListObjects operation was a success",
};

const LAST_MODIFIED_OBJECT_DATE: Series = Series {
    name: "last_modified_object_date",
    help: "The last modified date of the object that was modified most recently",
};

const LAST_MODIFIED_OBJECT_SIZE: Series = Series {
    name: "last_modified_object_size_bytes",
    help: "The size of the object that was modified most recently",
};

const OBJECTS_TOTAL: Series = Series {
    name: "objects_total",
    help: "The total number of objects for the bucket/prefix combination",
};

const OBJECTS_SIZE_SUM: Series = Series {
    name: "objects_size_sum_bytes",
    help: "The total size of all objects summed",
};

const BIGGEST_OBJECT_SIZE: Series = Series {
    name: "biggest_object_size_bytes",
    help: "The size of the biggest object",
};

/// Registry holding the gauges for one probe outcome.
///
/// A failed listing only yields `list_success 0`; the other series are left
/// out rather than reported as zero.
pub fn probe_registry(
    query: &ProbeQuery,
    outcome: &Result<Aggregate, ListError>,
) -> Result<Registry, prometheus::Error> {
    let registry = Registry::new();
    let labels = [query.bucket.as_str(), query.prefix.as_str()];

    match outcome {
        Ok(aggregate) => {
            set_gauge(&registry, &LIST_SUCCESS, &labels, 1.0)?;
            set_gauge(
                &registry,
                &LAST_MODIFIED_OBJECT_DATE,
                &labels,
                aggregate.most_recent_modified_seconds(),
            )?;
            set_gauge(
                &registry,
                &LAST_MODIFIED_OBJECT_SIZE,
                &labels,
                aggregate.most_recent_object_size_bytes as f64,
            )?;
            set_gauge(&registry, &OBJECTS_TOTAL, &labels, aggregate.object_count as f64)?;
            set_gauge(
                &registry,
                &OBJECTS_SIZE_SUM,
                &labels,
                aggregate.total_size_bytes as f64,
            )?;
            set_gauge(
                &registry,
                &BIGGEST_OBJECT_SIZE,
                &labels,
                aggregate.largest_size_bytes as f64,
            )?;
        }
        Err(_) => set_gauge(&registry, &LIST_SUCCESS, &labels, 0.0)?,
    }

    Ok(registry)
}

/// Registry with the exporter's own build information
pub fn build_info_registry() -> Result<Registry, prometheus::Error> {
    let registry = Registry::new();
    let build_info = GaugeVec::new(
        Opts::new(
            "build_info",
            "A metric with a constant '1' value labeled by name and version of the exporter",
        )
        .namespace("oss_exporter"),
        &["name", "version"],
    )?;
    build_info
        .with_label_values(&[env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")])
        .set(1.0);
    registry.register(Box::new(build_info))?;

    Ok(registry)
}

/// Render a registry in the text exposition format
pub fn encode(registry: &Registry) -> Result<String, prometheus::Error> {
    TextEncoder::new().encode_to_string(&registry.gather())
}

fn set_gauge(
    registry: &Registry,
    series: &Series,
    labels: &[&str],
    value: f64,
) -> Result<(), prometheus::Error> {
    let gauge = GaugeVec::new(
        Opts::new(series.name, series.help).namespace(NAMESPACE),
        &PROBE_LABELS,
    )?;
    gauge.with_label_values(labels).set(value);
    registry.register(Box::new(gauge))
}
