//! Pagination strategy implementations
//!
//! Each strategy reads one page from a record store and derives the
//! position metadata for it.

use super::response::assemble;
use super::types::{CursorRequest, Fetched, OffsetRequest, PaginationEnvelope, Position};
use crate::error::Result;
use crate::store::RecordStore;
use crate::types::Keyed;
use async_trait::async_trait;

/// Core trait for pagination strategies
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Validated request payload this strategy serves
    type Request: Send + Sync;

    /// Read the page (and count, when needed) from the store
    async fn fetch<S>(&self, store: &S, request: &Self::Request) -> Result<Fetched<S::Record>>
    where
        S: RecordStore + ?Sized;

    /// Derive position metadata and assemble the envelope
    fn build<T: Keyed>(&self, fetched: Fetched<T>, request: &Self::Request)
        -> PaginationEnvelope<T>;
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset pagination (skip/take over the active subset)
///
/// Counts the active subset on every call. Records inserted or removed
/// between calls shift which records land in a given page window.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetStrategy;

#[async_trait]
impl Strategy for OffsetStrategy {
    type Request = OffsetRequest;

    async fn fetch<S>(&self, store: &S, request: &OffsetRequest) -> Result<Fetched<S::Record>>
    where
        S: RecordStore + ?Sized,
    {
        let (items, total_count) = futures::try_join!(
            store.scan_offset(request.skip(), request.page_size() as usize),
            store.count(),
        )?;
        Ok(Fetched {
            items,
            total_count: Some(total_count),
        })
    }

    fn build<T: Keyed>(&self, fetched: Fetched<T>, request: &OffsetRequest) -> PaginationEnvelope<T> {
        let total_count = fetched.total_count.unwrap_or(0);
        let total_pages = total_count.div_ceil(u64::from(request.page_size()));
        let page = request.page();

        assemble(
            fetched.items,
            Some(total_count),
            u64::from(page) < total_pages,
            page > 1,
            Position::Offset {
                page,
                page_size: request.page_size(),
                total_pages,
            },
        )
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Keyset pagination on record id
///
/// Reads one row past the page (the peek row) to learn whether more
/// records follow; the peek row is never returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorStrategy;

#[async_trait]
impl Strategy for CursorStrategy {
    type Request = CursorRequest;

    async fn fetch<S>(&self, store: &S, request: &CursorRequest) -> Result<Fetched<S::Record>>
    where
        S: RecordStore + ?Sized,
    {
        let total_count = if request.include_total_count() {
            Some(store.count().await?)
        } else {
            None
        };
        let items = store
            .scan_after(request.lower_bound(), request.fetch_limit())
            .await?;
        Ok(Fetched { items, total_count })
    }

    fn build<T: Keyed>(&self, fetched: Fetched<T>, request: &CursorRequest) -> PaginationEnvelope<T> {
        let page_size = request.page_size() as usize;
        let mut items = fetched.items;

        let has_next_page = items.len() > page_size;
        if has_next_page {
            items.truncate(page_size);
        }
        let next_cursor = if has_next_page {
            items.last().map(Keyed::id)
        } else {
            None
        };

        // Ids start at 1, so cursor 0 is always the start of the collection.
        // The previous cursor echoes the input; it is not a computed boundary.
        let has_previous_page = request.cursor() > 0;
        let previous_cursor = has_previous_page.then_some(request.cursor());

        assemble(
            items,
            fetched.total_count,
            has_next_page,
            has_previous_page,
            Position::Cursor {
                next_cursor,
                previous_cursor,
            },
        )
    }
}
