//! Record store trait
//!
//! Defines the read capability consumed by the pagination strategies.

use crate::error::Result;
use crate::types::Keyed;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Read-only access to an ordered, keyed record collection.
///
/// Every operation sees only active records, ordered by ascending id.
/// Failures of any kind surface as `Error::Storage`; stores never retry.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The record type held by the store
    type Record: Keyed + Clone + Serialize + Send + Sync + 'static;

    /// Records with `id > after`, ascending, at most `limit` of them
    async fn scan_after(&self, after: i64, limit: usize) -> Result<Vec<Self::Record>>;

    /// Skip `skip` records from the start, then take at most `take`
    async fn scan_offset(&self, skip: u64, take: usize) -> Result<Vec<Self::Record>>;

    /// Number of active records
    async fn count(&self) -> Result<u64>;
}

/// Store handle shared across request handlers
pub type SharedStore<T> = Arc<dyn RecordStore<Record = T>>;

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    type Record = S::Record;

    async fn scan_after(&self, after: i64, limit: usize) -> Result<Vec<Self::Record>> {
        (**self).scan_after(after, limit).await
    }

    async fn scan_offset(&self, skip: u64, take: usize) -> Result<Vec<Self::Record>> {
        (**self).scan_offset(skip, take).await
    }

    async fn count(&self) -> Result<u64> {
        (**self).count().await
    }
}
