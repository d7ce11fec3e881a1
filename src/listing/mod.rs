//! Bucket listing summaries
//!
//! A probe opens one bucket, walks its listing under a prefix and reduces
//! the objects to an [`Aggregate`].

mod aggregate;
mod walker;

pub use aggregate::Aggregate;
pub use walker::ListingWalker;

use crate::error::ListError;
use crate::storage::ObjectStore;

/// Which objects a probe summarizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeQuery {
    pub bucket: String,
    pub prefix: String,
}

impl ProbeQuery {
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }
}

/// Open the query's bucket and walk it
pub async fn probe(store: &dyn ObjectStore, query: &ProbeQuery) -> Result<Aggregate, ListError> {
    let lister = store.bucket(&query.bucket).await?;
    ListingWalker::new(lister).walk(&query.prefix).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryBucket, MemoryStore, ObjectDescriptor};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_probe_walks_named_bucket() {
        let when = Utc.with_ymd_and_hms(2019, 6, 13, 21, 0, 0).unwrap();
        let store = MemoryStore::new().with_bucket(
            "mock",
            MemoryBucket::new(vec![ObjectDescriptor::new("one", 1234, when)]),
        );

        let aggregate = probe(&store, &ProbeQuery::new("mock", "one")).await.unwrap();
        assert_eq!(aggregate.object_count, 1);
        assert_eq!(aggregate.most_recent_modified, when);
    }

    #[tokio::test]
    async fn test_probe_unknown_bucket_fails() {
        let store = MemoryStore::new();
        let result = probe(&store, &ProbeQuery::new("missing", "")).await;
        assert!(matches!(result, Err(ListError::Bucket { .. })));
    }
}
