//! Count caching decorator
//!
//! Counting the active subset on every offset request costs a full scan.
//! `CachedCountStore` answers `count()` from a snapshot refreshed at most
//! once per TTL, trading an extra query for a count that may be stale by
//! up to the TTL. Scans always pass straight through.

use super::types::RecordStore;
use crate::error::Result;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Wraps a store and caches its count for `ttl`
pub struct CachedCountStore<S> {
    inner: S,
    ttl: Duration,
    cached: Mutex<Option<(u64, Instant)>>,
}

impl<S: RecordStore> CachedCountStore<S> {
    /// Create a caching wrapper
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// Drop the cached count so the next call hits the store
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for CachedCountStore<S> {
    type Record = S::Record;

    async fn scan_after(&self, after: i64, limit: usize) -> Result<Vec<Self::Record>> {
        self.inner.scan_after(after, limit).await
    }

    async fn scan_offset(&self, skip: u64, take: usize) -> Result<Vec<Self::Record>> {
        self.inner.scan_offset(skip, take).await
    }

    async fn count(&self) -> Result<u64> {
        // Held across the refresh so concurrent misses issue one count
        let mut cached = self.cached.lock().await;
        if let Some((count, at)) = *cached {
            if at.elapsed() < self.ttl {
                return Ok(count);
            }
        }
        let count = self.inner.count().await?;
        tracing::debug!(count, ttl_secs = self.ttl.as_secs(), "Refreshed cached count");
        *cached = Some((count, Instant::now()));
        Ok(count)
    }
}
