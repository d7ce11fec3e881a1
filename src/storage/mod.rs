//! Storage module for S3-compatible backends
//!
//! Supports Alibaba OSS, MinIO and AWS S3 through the S3 API, plus an
//! in-memory store for tests.

mod memory;
mod s3_client;
mod traits;
mod types;

pub use memory::{ListRequest, MemoryBucket, MemoryStore};
pub use s3_client::{S3BucketLister, S3Store};
pub use traits::{ObjectLister, ObjectStore};
pub use types::*;
