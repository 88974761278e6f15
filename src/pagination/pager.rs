//! Dispatcher
//!
//! `Pager` is the single place mapping a pagination kind to its strategy.

use super::strategies::{CursorStrategy, OffsetStrategy, Strategy};
use super::types::{PaginationEnvelope, PaginationRequest, RawPaginationRequest};
use super::validate::{validate, RequestDefaults};
use crate::error::Result;
use crate::store::RecordStore;
use std::sync::Arc;

/// Serves pages from one record store.
///
/// Holds no per-request state; one `Pager` may serve any number of
/// concurrent requests.
pub struct Pager<S: ?Sized> {
    store: Arc<S>,
    defaults: RequestDefaults,
    offset: OffsetStrategy,
    cursor: CursorStrategy,
}

impl<S: RecordStore + ?Sized> Pager<S> {
    /// Create a pager over a store
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            defaults: RequestDefaults::default(),
            offset: OffsetStrategy,
            cursor: CursorStrategy,
        }
    }

    /// Override the defaults applied to omitted request fields
    #[must_use]
    pub fn with_defaults(mut self, defaults: RequestDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Defaults applied during validation
    pub fn defaults(&self) -> RequestDefaults {
        self.defaults
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validate a wire request, then serve it
    pub async fn paginate_raw(
        &self,
        raw: RawPaginationRequest,
    ) -> Result<PaginationEnvelope<S::Record>> {
        let request = validate(raw, self.defaults).inspect_err(|e| {
            tracing::debug!(error = %e, "Rejected pagination request");
        })?;
        self.paginate(&request).await
    }

    /// Serve a validated request
    pub async fn paginate(
        &self,
        request: &PaginationRequest,
    ) -> Result<PaginationEnvelope<S::Record>> {
        let result = match request {
            PaginationRequest::Offset(offset) => run(&self.offset, &*self.store, offset).await,
            PaginationRequest::Cursor(cursor) => run(&self.cursor, &*self.store, cursor).await,
        };

        match &result {
            Ok(page) => tracing::debug!(
                pagination_type = %request.kind(),
                records = page.data.len(),
                has_next_page = page.has_next_page,
                "Served page"
            ),
            Err(e) if e.is_client_error() => {
                tracing::debug!(pagination_type = %request.kind(), error = %e, "Rejected pagination request");
            }
            Err(e) => {
                tracing::error!(pagination_type = %request.kind(), error = %e, "Pagination failed");
            }
        }
        result
    }
}

async fn run<St, S>(
    strategy: &St,
    store: &S,
    request: &St::Request,
) -> Result<PaginationEnvelope<S::Record>>
where
    St: Strategy,
    S: RecordStore + ?Sized,
{
    let fetched = strategy.fetch(store, request).await?;
    Ok(strategy.build(fetched, request))
}
