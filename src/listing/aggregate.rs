//! Running summary of a bucket listing

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::storage::ObjectDescriptor;

/// Count, size and recency figures for every object seen so far.
///
/// An empty aggregate dates its most recent object at
/// [`DateTime::<Utc>::MIN_UTC`], so a listing with no objects reports a very
/// large negative timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub object_count: i64,
    pub total_size_bytes: i64,
    pub largest_size_bytes: i64,
    pub most_recent_modified: DateTime<Utc>,
    /// Size of the object dated `most_recent_modified`
    pub most_recent_object_size_bytes: i64,
}

impl Default for Aggregate {
    fn default() -> Self {
        Self {
            object_count: 0,
            total_size_bytes: 0,
            largest_size_bytes: 0,
            most_recent_modified: DateTime::<Utc>::MIN_UTC,
            most_recent_object_size_bytes: 0,
        }
    }
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one page of objects into the summary, in page order
    pub fn fold(mut self, objects: &[ObjectDescriptor]) -> Self {
        for object in objects {
            self.observe(object);
        }
        self
    }

    fn observe(&mut self, object: &ObjectDescriptor) {
        self.object_count += 1;
        self.total_size_bytes = self.total_size_bytes.saturating_add(object.size);
        self.largest_size_bytes = self.largest_size_bytes.max(object.size);

        // Strictly newer only: on equal dates the first object seen wins.
        if object.last_modified > self.most_recent_modified {
            self.most_recent_modified = object.last_modified;
            self.most_recent_object_size_bytes = object.size;
        }
    }

    /// Most recent modification date as Unix seconds
    pub fn most_recent_modified_seconds(&self) -> f64 {
        self.most_recent_modified.timestamp() as f64
    }
}
