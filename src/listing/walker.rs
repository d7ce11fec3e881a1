//! Pagination walker
//!
//! Pages through a bucket listing and folds every page into an [`Aggregate`].

use crate::error::ListError;
use crate::storage::ObjectLister;

use super::aggregate::Aggregate;

/// Walks every page of a listing for one bucket
pub struct ListingWalker {
    lister: Box<dyn ObjectLister>,
}

impl ListingWalker {
    /// Create a walker over a lister bound to one bucket
    pub fn new(lister: Box<dyn ObjectLister>) -> Self {
        Self { lister }
    }

    /// Summarize every object under `prefix`.
    ///
    /// Pages are fetched one after another, each with the marker returned by
    /// the previous one, until a page is not truncated. The first failed
    /// fetch ends the walk; pages already folded are dropped so a failure
    /// never surfaces as a partial count.
    pub async fn walk(&self, prefix: &str) -> Result<Aggregate, ListError> {
        let mut aggregate = Aggregate::new();
        let mut marker = String::new();
        let mut pages = 0usize;

        loop {
            let page = self.lister.list_page(prefix, &marker).await?;
            pages += 1;

            tracing::trace!(
                prefix,
                marker = %marker,
                objects = page.objects.len(),
                truncated = page.is_truncated,
                "Fetched listing page"
            );

            aggregate = aggregate.fold(&page.objects);

            if !page.is_truncated {
                break;
            }
            marker = page.next_marker;
        }

        tracing::debug!(
            prefix,
            pages,
            objects = aggregate.object_count,
            bytes = aggregate.total_size_bytes,
            "Listing walk complete"
        );

        Ok(aggregate)
    }
}
