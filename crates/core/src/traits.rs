//! ObjectLister trait definition
//!
//! This trait is the listing capability the analysis engine consumes.
//! It keeps the engine decoupled from any specific S3 SDK and lets the
//! pagination loop be tested against a mock backend.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// One stored object as reported by a listing call.
///
/// The size is kept as the backend reports it (`i64`); the aggregator
/// clamps negatives to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    /// Object key, a `/`-delimited path string
    pub key: String,

    /// Size in bytes
    pub size: i64,
}

impl ObjectDescriptor {
    /// Create a new descriptor
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

/// One page of a paginated object listing.
///
/// `continuation` is `Some` while more pages remain; `None` is the
/// end-of-listing marker.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    /// Objects in this page
    pub objects: Vec<ObjectDescriptor>,

    /// Token to request the next page, if any
    pub continuation: Option<String>,
}

/// Metadata for a bucket from the bucket-listing capability.
#[derive(Debug, Clone, Serialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp, if the backend reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<jiff::Timestamp>,
}

impl BucketInfo {
    /// Create a new BucketInfo with no creation date
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: None,
        }
    }
}

/// Paginated listing capability of an object-storage backend.
///
/// Implemented by the S3 adapter and mocked for testing. The engine only
/// ever reads through this trait; it performs no writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// Fetch one page of the object listing for a bucket.
    ///
    /// Pass the continuation token from the previous page, or `None` for
    /// the first page.
    async fn list_page(&self, bucket: &str, continuation: Option<String>) -> Result<ObjectPage>;

    /// List all buckets visible to the caller.
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;
}
