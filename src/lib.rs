//! OSS Exporter Library
//!
//! Walks the object listing of an S3-compatible bucket and exposes object
//! count, size and recency gauges for Prometheus to scrape.
//!
//! # Modules
//!
//! - `listing`: pagination walker and the aggregate it folds pages into
//! - `storage`: backend traits, the S3 implementation and an in-memory store
//! - `exporter`: rendering of probe results as Prometheus gauges
//! - `routes`: HTTP endpoints

pub mod config;
pub mod error;
pub mod exporter;
pub mod listing;
pub mod routes;
pub mod state;
pub mod storage;
