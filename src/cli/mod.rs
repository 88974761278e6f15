//! CLI module
//!
//! Command-line interface for the pagination service.
//!
//! # Commands
//!
//! - `serve` - Start HTTP server mode
//! - `seed` - Create and seed a DuckDB user database
//! - `page` - Fetch one page and print the envelope
//! - `bench` - Time the offset and cursor scenarios

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{open_store, Runner};
pub use server::{router, serve, UserPager, UserPageQuery};
