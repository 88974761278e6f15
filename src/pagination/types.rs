//! Pagination types
//!
//! Defines the wire request, the validated request sum type, the raw fetch
//! result handed from a strategy to the response builder, and the response
//! envelope.

use crate::error::{Error, Result};
use crate::types::PaginationType;
use serde::{Deserialize, Serialize};

// ============================================================================
// Validated Requests
// ============================================================================

/// Offset request: 1-based page number and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRequest {
    page: u32,
    page_size: u32,
}

impl OffsetRequest {
    /// Validate and build an offset request
    pub fn new(page: i64, page_size: i64) -> Result<Self> {
        if page < 1 {
            return Err(Error::invalid_request("page must be ≥ 1"));
        }
        let page = u32::try_from(page).map_err(|_| Error::invalid_request("page is too large"))?;
        Ok(Self {
            page,
            page_size: checked_page_size(page_size)?,
        })
    }

    /// Requested page number (≥ 1)
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size (≥ 1)
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of active records to skip: `(page - 1) * page_size`
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

/// Cursor request: last seen id and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorRequest {
    cursor: i64,
    page_size: u32,
    is_previous_page: bool,
    include_total_count: bool,
}

impl CursorRequest {
    /// Validate and build a forward cursor request without a total count
    pub fn new(cursor: i64, page_size: i64) -> Result<Self> {
        if cursor < 0 {
            return Err(Error::invalid_request("cursor must be non-negative"));
        }
        Ok(Self {
            cursor,
            page_size: checked_page_size(page_size)?,
            is_previous_page: false,
            include_total_count: false,
        })
    }

    /// Ask for the window before the cursor instead of after it
    #[must_use]
    pub fn previous_page(mut self, is_previous_page: bool) -> Self {
        self.is_previous_page = is_previous_page;
        self
    }

    /// Also count the active records
    #[must_use]
    pub fn with_total_count(mut self, include_total_count: bool) -> Self {
        self.include_total_count = include_total_count;
        self
    }

    /// Last seen id (0 = start of collection)
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Requested page size (≥ 1)
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_previous_page(&self) -> bool {
        self.is_previous_page
    }

    pub fn include_total_count(&self) -> bool {
        self.include_total_count
    }

    /// Exclusive id bound for the range scan.
    ///
    /// Going backward rewinds two page sizes from the cursor. This only
    /// lands on the true previous window when ids in between are dense.
    pub fn lower_bound(&self) -> i64 {
        if self.is_previous_page {
            self.cursor
                .saturating_sub(i64::from(self.page_size).saturating_mul(2))
        } else {
            self.cursor
        }
    }

    /// Rows to read: one page plus the peek row
    pub fn fetch_limit(&self) -> usize {
        self.page_size as usize + 1
    }
}

fn checked_page_size(page_size: i64) -> Result<u32> {
    if page_size < 1 {
        return Err(Error::invalid_request("page size must be greater than 0"));
    }
    u32::try_from(page_size).map_err(|_| Error::invalid_request("page size is too large"))
}

/// A validated request: exactly one strategy, exactly one payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationRequest {
    Offset(OffsetRequest),
    Cursor(CursorRequest),
}

impl PaginationRequest {
    /// The strategy this request selects
    pub fn kind(&self) -> PaginationType {
        match self {
            Self::Offset(_) => PaginationType::Offset,
            Self::Cursor(_) => PaginationType::Cursor,
        }
    }
}

impl From<OffsetRequest> for PaginationRequest {
    fn from(request: OffsetRequest) -> Self {
        Self::Offset(request)
    }
}

impl From<CursorRequest> for PaginationRequest {
    fn from(request: CursorRequest) -> Self {
        Self::Cursor(request)
    }
}

// ============================================================================
// Wire Requests
// ============================================================================

/// Request as received: a discriminator plus optional payloads.
///
/// Turned into a `PaginationRequest` by [`validate`](super::validate).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaginationRequest {
    #[serde(default)]
    pub pagination_type: Option<RawDiscriminator>,
    #[serde(default)]
    pub offset_pagination: Option<RawOffsetPagination>,
    #[serde(default)]
    pub cursor_pagination: Option<RawCursorPagination>,
}

/// Discriminator as sent: a numeric code or a name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawDiscriminator {
    Code(i64),
    Name(String),
}

impl RawDiscriminator {
    /// Resolve to a known pagination type
    pub fn resolve(&self) -> Result<PaginationType> {
        match self {
            Self::Code(code) => PaginationType::from_code(*code),
            Self::Name(name) => name.parse(),
        }
    }
}

impl From<PaginationType> for RawDiscriminator {
    fn from(kind: PaginationType) -> Self {
        Self::Name(kind.to_string())
    }
}

/// Offset payload as sent. Missing fields take defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffsetPagination {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Cursor payload as sent. Missing fields take defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCursorPagination {
    #[serde(default)]
    pub cursor: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
    #[serde(default, alias = "isQueryPreviousPage")]
    pub is_previous_page: Option<bool>,
    #[serde(default, alias = "isIncludeTotalCount")]
    pub include_total_count: Option<bool>,
}

// ============================================================================
// Strategy Output
// ============================================================================

/// What a strategy read from the store, before metadata is derived
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// Records in ascending id order (cursor fetches include the peek row)
    pub items: Vec<T>,
    /// Count of active records, when it was queried
    pub total_count: Option<u64>,
}

// ============================================================================
// Response Envelope
// ============================================================================

/// A page plus its position in the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationEnvelope<T> {
    /// At most `page_size` records, ascending by id
    pub data: Vec<T>,
    pub total_count: Option<u64>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    #[serde(flatten)]
    pub position: Position,
}

/// Strategy-specific bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    #[serde(rename_all = "camelCase")]
    Offset {
        page: u32,
        page_size: u32,
        total_pages: u64,
    },
    #[serde(rename_all = "camelCase")]
    Cursor {
        next_cursor: Option<i64>,
        previous_cursor: Option<i64>,
    },
}

impl<T> PaginationEnvelope<T> {
    /// Cursor to pass for the next forward page, if any
    pub fn next_cursor(&self) -> Option<i64> {
        match self.position {
            Position::Cursor { next_cursor, .. } => next_cursor,
            Position::Offset { .. } => None,
        }
    }

    /// Total page count, for offset pages
    pub fn total_pages(&self) -> Option<u64> {
        match self.position {
            Position::Offset { total_pages, .. } => Some(total_pages),
            Position::Cursor { .. } => None,
        }
    }
}
