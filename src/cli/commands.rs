//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Offset and keyset pagination service
#[derive(Parser, Debug)]
#[command(name = "keyset-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Use this DuckDB file as the record store (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server mode
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Create a DuckDB user database and seed it
    Seed {
        /// Number of users to insert
        #[arg(long, default_value = "10000")]
        count: usize,
    },

    /// Fetch a single page and print it
    Page {
        /// Pagination type: offset or cursor
        #[arg(short = 't', long = "type", default_value = "offset")]
        pagination_type: String,

        /// Page number (offset)
        #[arg(long)]
        page: Option<i64>,

        /// Page size
        #[arg(long)]
        page_size: Option<i64>,

        /// Last seen id (cursor)
        #[arg(long)]
        cursor: Option<i64>,

        /// Fetch the window before the cursor (cursor)
        #[arg(long)]
        previous: bool,

        /// Include the total record count (cursor)
        #[arg(long)]
        total_count: bool,
    },

    /// Time offset and cursor pagination on the configured store
    Bench {
        /// Runs per scenario
        #[arg(long, default_value = "20")]
        iterations: u32,

        /// Page size used by every scenario
        #[arg(long, default_value = "50", value_parser = clap::value_parser!(u32).range(1..))]
        page_size: u32,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}
