//! Storage traits
//!
//! Backend-agnostic interfaces for opening a bucket and listing it page by page.

use async_trait::async_trait;

use crate::error::ListError;

use super::types::Page;

/// Lists one bucket, one page at a time
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// Fetch the page of objects under `prefix` that follows `marker`.
    ///
    /// An empty marker starts from the beginning of the listing.
    async fn list_page(&self, prefix: &str, marker: &str) -> Result<Page, ListError>;
}

/// Hands out listers bound to a named bucket
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn bucket(&self, name: &str) -> Result<Box<dyn ObjectLister>, ListError>;
}
