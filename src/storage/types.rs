//! Storage types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata about a single object, as returned by a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectDescriptor {
    pub key: String,
    pub size: i64,
    pub last_modified: DateTime<Utc>,
}

impl ObjectDescriptor {
    pub fn new(key: impl Into<String>, size: i64, last_modified: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified,
        }
    }
}

/// One page of a listing
#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    pub objects: Vec<ObjectDescriptor>,
    pub is_truncated: bool,
    /// Marker to pass back for the next page; only meaningful when truncated
    pub next_marker: String,
}

impl Page {
    /// A page that ends the listing
    pub fn last(objects: Vec<ObjectDescriptor>) -> Self {
        Self {
            objects,
            is_truncated: false,
            next_marker: String::new(),
        }
    }

    /// A page with more results behind `next_marker`
    pub fn truncated(objects: Vec<ObjectDescriptor>, next_marker: impl Into<String>) -> Self {
        Self {
            objects,
            is_truncated: true,
            next_marker: next_marker.into(),
        }
    }
}
