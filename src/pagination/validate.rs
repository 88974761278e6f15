//! Request validation
//!
//! Turns a [`RawPaginationRequest`] into a [`PaginationRequest`] before any
//! store access. Every failure here is an `Error::InvalidRequest`.

use super::types::{
    CursorRequest, OffsetRequest, PaginationRequest, RawCursorPagination, RawOffsetPagination,
    RawPaginationRequest,
};
use crate::error::{Error, Result};
use crate::types::PaginationType;

/// Page size used when a payload omits it
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Values applied to omitted payload fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDefaults {
    pub page_size: u32,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Validate a wire request.
///
/// The discriminator must name a known strategy and exactly the matching
/// payload must be present.
pub fn validate(raw: RawPaginationRequest, defaults: RequestDefaults) -> Result<PaginationRequest> {
    let kind = raw
        .pagination_type
        .as_ref()
        .ok_or_else(|| Error::invalid_request("paginationType is required"))?
        .resolve()?;

    let request: PaginationRequest = match (kind, raw.offset_pagination, raw.cursor_pagination) {
        (PaginationType::Offset, Some(offset), None) => offset_request(offset, defaults)?.into(),
        (PaginationType::Cursor, None, Some(cursor)) => cursor_request(cursor, defaults)?.into(),
        (_, Some(_), Some(_)) => {
            return Err(Error::invalid_request(
                "only one of offsetPagination or cursorPagination may be set",
            ))
        }
        (PaginationType::Offset, None, Some(_)) => {
            return Err(Error::invalid_request(
                "cursorPagination does not match paginationType offset",
            ))
        }
        (PaginationType::Cursor, Some(_), None) => {
            return Err(Error::invalid_request(
                "offsetPagination does not match paginationType cursor",
            ))
        }
        (PaginationType::Offset, None, None) => {
            return Err(Error::invalid_request(
                "offsetPagination is required for offset pagination",
            ))
        }
        (PaginationType::Cursor, None, None) => {
            return Err(Error::invalid_request(
                "cursorPagination is required for cursor pagination",
            ))
        }
    };

    tracing::trace!(?request, "Validated pagination request");
    Ok(request)
}

fn offset_request(raw: RawOffsetPagination, defaults: RequestDefaults) -> Result<OffsetRequest> {
    OffsetRequest::new(
        raw.page.unwrap_or(1),
        raw.page_size.unwrap_or(i64::from(defaults.page_size)),
    )
}

fn cursor_request(raw: RawCursorPagination, defaults: RequestDefaults) -> Result<CursorRequest> {
    Ok(CursorRequest::new(
        raw.cursor.unwrap_or(0),
        raw.page_size.unwrap_or(i64::from(defaults.page_size)),
    )?
    .previous_page(raw.is_previous_page.unwrap_or(false))
    .with_total_count(raw.include_total_count.unwrap_or(false)))
}
