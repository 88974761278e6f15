//! Record store module
//!
//! Supports: in-memory, DuckDB (file or in-memory), TTL-cached counts
//!
//! # Overview
//!
//! A record store holds an ordered collection of keyed records and answers
//! the three reads pagination needs: a keyset range scan, a positional
//! skip/take scan and a count, all restricted to the active subset.
//! The pagination core never writes through this interface.

mod cached;
mod database;
mod memory;
mod seed;
mod types;

pub use cached::CachedCountStore;
pub use database::DuckDbStore;
pub use memory::MemoryStore;
pub use seed::{seed_user, seed_users, SEED_BATCH_SIZE};
pub use types::{RecordStore, SharedStore};

#[cfg(test)]
mod tests;
