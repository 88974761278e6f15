//! Pagination module
//!
//! Supports: Offset (page number + page size), Cursor (keyset on record id)
//!
//! # Overview
//!
//! A caller request flows through four stages:
//!
//! ```text
//! RawPaginationRequest ─▶ validate ─▶ Pager (dispatch) ─▶ Strategy::fetch ─▶ Strategy::build ─▶ PaginationEnvelope
//! ```
//!
//! Validation turns the wire shape (discriminator plus two optional
//! payloads) into the `PaginationRequest` sum type, so a strategy never
//! sees a payload that does not match its kind. Strategies issue at most
//! two reads against the record store and never write.

mod pager;
mod response;
mod strategies;
mod types;
mod validate;

pub use pager::Pager;
pub use response::assemble;
pub use strategies::{CursorStrategy, OffsetStrategy, Strategy};
pub use types::{
    CursorRequest, Fetched, OffsetRequest, PaginationEnvelope, PaginationRequest, Position,
    RawCursorPagination, RawDiscriminator, RawOffsetPagination, RawPaginationRequest,
};
pub use validate::{validate, RequestDefaults, DEFAULT_PAGE_SIZE};
