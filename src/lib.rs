#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

//! # keyset-pager
//!
//! Serves a large ordered collection of records through two pagination
//! strategies and reports where each page sits in the collection.
//!
//! ## Features
//!
//! - **Offset Pagination**: page number + page size, with total count and total pages
//! - **Cursor Pagination**: keyset range scan on record id with a peek row for `hasNextPage`
//! - **Validated Requests**: wire requests become a sum type before any store access
//! - **Pluggable Stores**: in-memory, DuckDB, and a TTL count cache decorator
//! - **HTTP Server**: axum routes for query-string and JSON requests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use keyset_pager::pagination::{CursorRequest, Pager};
//! use keyset_pager::store::{seed_users, MemoryStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> keyset_pager::Result<()> {
//!     let store = MemoryStore::from_records(seed_users(10_000))?;
//!     let pager = Pager::new(Arc::new(store));
//!
//!     let mut cursor = 0;
//!     loop {
//!         let page = pager.paginate(&CursorRequest::new(cursor, 50)?.into()).await?;
//!         // Process page.data
//!         match page.next_cursor() {
//!             Some(next) => cursor = next,
//!             None => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                  HTTP (axum)  /  CLI (clap)                    │
//! └───────────────────────────────┬────────────────────────────────┘
//!                                 │ RawPaginationRequest
//! ┌───────────────────────────────┴────────────────────────────────┐
//! │ validate ─▶ Pager ─▶ Offset | Cursor strategy ─▶ Envelope      │
//! └───────────────────────────────┬────────────────────────────────┘
//!                                 │ scan_after / scan_offset / count
//! ┌──────────────┬────────────────┴───────┬────────────────────────┐
//! │ MemoryStore  │ DuckDbStore            │ CachedCountStore       │
//! └──────────────┴────────────────────────┴────────────────────────┘
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Record model and pagination discriminator
pub mod types;

/// Request validation, strategies, dispatch and response envelope
pub mod pagination;

/// Record stores
pub mod store;

/// Service configuration
pub mod config;

/// Command-line interface and HTTP server
pub mod cli;

/// Offset vs cursor latency harness
pub mod bench;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{Keyed, PaginationType, User};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
