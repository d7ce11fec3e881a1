//! In-memory object store
//!
//! Serves listings from a fixed set of objects with a configurable page size
//! and an injectable request failure. Stands in for a real backend in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::ListError;

use super::traits::{ObjectLister, ObjectStore};
use super::types::{ObjectDescriptor, Page};

/// A list call as received by a [`MemoryBucket`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub prefix: String,
    pub marker: String,
}

/// Store holding any number of named in-memory buckets
#[derive(Clone, Default)]
pub struct MemoryStore {
    buckets: HashMap<String, MemoryBucket>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, name: impl Into<String>, bucket: MemoryBucket) -> Self {
        self.buckets.insert(name.into(), bucket);
        self
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn bucket(&self, name: &str) -> Result<Box<dyn ObjectLister>, ListError> {
        self.buckets
            .get(name)
            .map(|bucket| Box::new(bucket.clone()) as Box<dyn ObjectLister>)
            .ok_or_else(|| ListError::Bucket {
                bucket: name.to_string(),
                message: "no such bucket".to_string(),
            })
    }
}

/// Bucket contents in listing order. Keys must be unique; the marker of a
/// truncated page is the key of its last object.
#[derive(Clone)]
pub struct MemoryBucket {
    objects: Arc<Vec<ObjectDescriptor>>,
    page_size: usize,
    fail_on_request: Option<usize>,
    requests: Arc<Mutex<Vec<ListRequest>>>,
}

impl MemoryBucket {
    /// A bucket that returns everything matching a prefix in one page
    pub fn new(objects: Vec<ObjectDescriptor>) -> Self {
        Self {
            objects: Arc::new(objects),
            page_size: usize::MAX,
            fail_on_request: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Make the n-th list call (1-based) fail
    pub fn failing_on_request(mut self, request: usize) -> Self {
        self.fail_on_request = Some(request);
        self
    }

    /// Every list call received so far, oldest first
    pub fn requests(&self) -> Vec<ListRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ObjectLister for MemoryBucket {
    async fn list_page(&self, prefix: &str, marker: &str) -> Result<Page, ListError> {
        let request_number = {
            let mut requests = self.requests.lock();
            requests.push(ListRequest {
                prefix: prefix.to_string(),
                marker: marker.to_string(),
            });
            requests.len()
        };

        let request_error = |message: &str| ListError::Request {
            prefix: prefix.to_string(),
            marker: marker.to_string(),
            message: message.to_string(),
        };

        if self.fail_on_request == Some(request_number) {
            return Err(request_error("injected failure"));
        }

        let matching: Vec<&ObjectDescriptor> = self
            .objects
            .iter()
            .filter(|obj| obj.key.starts_with(prefix))
            .collect();

        let start = if marker.is_empty() {
            0
        } else {
            matching
                .iter()
                .position(|obj| obj.key == marker)
                .map(|index| index + 1)
                .ok_or_else(|| request_error("unknown marker"))?
        };

        let end = start.saturating_add(self.page_size).min(matching.len());
        let objects: Vec<ObjectDescriptor> =
            matching[start..end].iter().map(|obj| (*obj).clone()).collect();

        if end < matching.len() {
            let next_marker = objects
                .last()
                .map(|obj| obj.key.clone())
                .unwrap_or_default();
            Ok(Page::truncated(objects, next_marker))
        } else {
            Ok(Page::last(objects))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn objects(keys: &[&str]) -> Vec<ObjectDescriptor> {
        keys.iter()
            .map(|key| ObjectDescriptor::new(*key, 1, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()))
            .collect()
    }

    #[tokio::test]
    async fn test_pages_follow_markers() {
        let bucket = MemoryBucket::new(objects(&["a", "b", "c"])).with_page_size(2);

        let first = bucket.list_page("", "").await.unwrap();
        assert!(first.is_truncated);
        assert_eq!(first.objects.len(), 2);
        assert_eq!(first.next_marker, "b");

        let second = bucket.list_page("", &first.next_marker).await.unwrap();
        assert!(!second.is_truncated);
        assert_eq!(second.objects[0].key, "c");
    }

    #[tokio::test]
    async fn test_prefix_filters_objects() {
        let bucket = MemoryBucket::new(objects(&["logs/1", "data/1", "logs/2"]));

        let page = bucket.list_page("logs/", "").await.unwrap();
        let keys: Vec<&str> = page.objects.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["logs/1", "logs/2"]);
    }

    #[tokio::test]
    async fn test_unknown_marker_fails() {
        let bucket = MemoryBucket::new(objects(&["a"]));
        assert!(bucket.list_page("", "zzz").await.is_err());
    }

    #[tokio::test]
    async fn test_injected_failure_and_request_log() {
        let bucket = MemoryBucket::new(objects(&["a", "b"]))
            .with_page_size(1)
            .failing_on_request(2);

        assert!(bucket.list_page("", "").await.is_ok());
        assert!(bucket.list_page("", "a").await.is_err());
        assert_eq!(
            bucket.requests(),
            vec![
                ListRequest { prefix: String::new(), marker: String::new() },
                ListRequest { prefix: String::new(), marker: "a".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_store_unknown_bucket() {
        let store = MemoryStore::new().with_bucket("known", MemoryBucket::new(Vec::new()));

        assert!(store.bucket("known").await.is_ok());
        assert!(matches!(
            store.bucket("missing").await,
            Err(ListError::Bucket { .. })
        ));
    }
}
