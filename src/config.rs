//! Service configuration
//!
//! Loaded from a YAML file. Every section and field has a default, so an
//! empty file (or no file) yields a working in-memory service.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! store:
//!   kind: duckdb
//!   path: users.duckdb
//!   seed: 10000
//! pagination:
//!   default_page_size: 50
//!   count_cache_ttl_secs: 30
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::pagination::{RequestDefaults, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub pagination: PaginationSettings,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.pagination.default_page_size == 0 {
            return Err(Error::config("pagination.default_page_size must be greater than 0"));
        }
        if self.store.kind == StoreKind::Duckdb && self.store.path.is_none() {
            tracing::debug!("DuckDB store without a path, using an in-memory database");
        }
        self.server.socket_addr()?;
        Ok(())
    }
}

// ============================================================================
// Server
// ============================================================================

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    /// Address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::config(format!("Invalid listen address {}: {e}", self.host)))
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

// ============================================================================
// Store
// ============================================================================

/// Which record store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    #[default]
    Memory,
    Duckdb,
}

/// Record store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub kind: StoreKind,

    /// DuckDB file (in-memory database when absent)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Users to seed on startup when the store is empty
    #[serde(default = "default_seed")]
    pub seed: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            path: None,
            seed: default_seed(),
        }
    }
}

fn default_seed() -> usize {
    10_000
}

// ============================================================================
// Pagination
// ============================================================================

/// Pagination behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSettings {
    /// Page size applied when a request omits it
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Cache the active-record count for this many seconds.
    ///
    /// Off by default: every offset request counts afresh. When set,
    /// `totalCount` may lag the store by up to the TTL.
    #[serde(default)]
    pub count_cache_ttl_secs: Option<u64>,
}

impl PaginationSettings {
    /// Defaults handed to the validator
    pub fn request_defaults(&self) -> RequestDefaults {
        RequestDefaults {
            page_size: self.default_page_size,
        }
    }

    /// Count cache TTL, if caching is enabled
    pub fn count_cache_ttl(&self) -> Option<Duration> {
        self.count_cache_ttl_secs.map(Duration::from_secs)
    }
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            count_cache_ttl_secs: None,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
