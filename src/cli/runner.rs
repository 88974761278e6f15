//! CLI runner - executes commands

use crate::bench;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::cli::server::{self, UserPager};
use crate::config::{ServiceConfig, StoreKind};
use crate::error::{Error, Result};
use crate::pagination::{
    Pager, RawCursorPagination, RawDiscriminator, RawOffsetPagination, RawPaginationRequest,
};
use crate::store::{
    seed_users, CachedCountStore, DuckDbStore, MemoryStore, RecordStore, SharedStore,
};
use crate::types::{PaginationType, User};
use serde::Serialize;
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Serve { port, host } => {
                let mut config = config;
                if let Some(port) = port {
                    config.server.port = *port;
                }
                if let Some(host) = host {
                    config.server.host.clone_from(host);
                }
                let pager = self.build_pager(&config).await?;
                server::serve(&config.server, pager).await
            }
            Commands::Seed { count } => self.seed(&config, *count).await,
            Commands::Page {
                pagination_type,
                page,
                page_size,
                cursor,
                previous,
                total_count,
            } => {
                let raw = page_request(
                    pagination_type,
                    *page,
                    *page_size,
                    *cursor,
                    *previous,
                    *total_count,
                )?;
                let pager = self.build_pager(&config).await?;
                let envelope = pager.paginate_raw(raw).await?;
                self.print(&envelope)
            }
            Commands::Bench {
                iterations,
                page_size,
            } => {
                let pager = self.build_pager(&config).await?;
                let total = pager.store().count().await?;
                let scenarios = bench::scenarios(total, *page_size)?;
                tracing::info!(
                    total_records = total,
                    scenarios = scenarios.len(),
                    iterations,
                    "Starting benchmark"
                );
                let results = bench::run(&*pager, &scenarios, *iterations).await?;
                self.print(&results)
            }
        }
    }

    /// Load config file, then apply global flag overrides
    fn load_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };
        if let Some(database) = &self.cli.database {
            config.store.kind = StoreKind::Duckdb;
            config.store.path = Some(database.clone());
        }
        Ok(config)
    }

    async fn build_pager(&self, config: &ServiceConfig) -> Result<Arc<UserPager>> {
        let store = open_store(config).await?;
        Ok(Arc::new(
            Pager::new(store).with_defaults(config.pagination.request_defaults()),
        ))
    }

    /// Seed a DuckDB database
    async fn seed(&self, config: &ServiceConfig, count: usize) -> Result<()> {
        let path = config
            .store
            .path
            .as_ref()
            .filter(|_| config.store.kind == StoreKind::Duckdb)
            .ok_or_else(|| Error::config("seed needs a DuckDB file (use --database)"))?;

        let store = DuckDbStore::open(path)?;
        let inserted = store.seed(count).await?;
        let total = store.count().await?;
        tracing::info!(inserted, total, database = %path.display(), "Seeded users");

        self.print(&serde_json::json!({
            "type": "SEED",
            "database": path.display().to_string(),
            "inserted": inserted,
            "active_records": total,
        }))
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let output = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{output}");
        Ok(())
    }
}

/// Open the configured record store, seeding it when empty
pub async fn open_store(config: &ServiceConfig) -> Result<SharedStore<User>> {
    let settings = &config.store;
    let store: SharedStore<User> = match settings.kind {
        StoreKind::Memory => {
            tracing::info!(records = settings.seed, "Using in-memory user store");
            Arc::new(MemoryStore::from_records(seed_users(settings.seed))?)
        }
        StoreKind::Duckdb => {
            let db = match &settings.path {
                Some(path) => DuckDbStore::open(path)?,
                None => DuckDbStore::open_in_memory()?,
            };
            if settings.seed > 0 && db.count().await? == 0 {
                db.seed(settings.seed).await?;
                tracing::info!(records = settings.seed, database = db.location(), "Seeded empty user store");
            }
            tracing::info!(database = db.location(), "Using DuckDB user store");
            Arc::new(db)
        }
    };

    let store: SharedStore<User> = match config.pagination.count_cache_ttl() {
        Some(ttl) => {
            tracing::info!(ttl_secs = ttl.as_secs(), "Caching active record count");
            Arc::new(CachedCountStore::new(store, ttl))
        }
        None => store,
    };
    Ok(store)
}

/// Build a wire request from `page` flags.
///
/// A payload is present when any of its own flags is given, so mixing
/// offset and cursor flags is rejected by validation like any other caller.
fn page_request(
    pagination_type: &str,
    page: Option<i64>,
    page_size: Option<i64>,
    cursor: Option<i64>,
    previous: bool,
    total_count: bool,
) -> Result<RawPaginationRequest> {
    let kind: PaginationType = pagination_type.parse()?;
    let cursor_flags = cursor.is_some() || previous || total_count;

    let offset_pagination = (kind == PaginationType::Offset || page.is_some()).then(|| {
        RawOffsetPagination {
            page,
            page_size: if kind == PaginationType::Offset { page_size } else { None },
        }
    });
    let cursor_pagination = (kind == PaginationType::Cursor || cursor_flags).then(|| {
        RawCursorPagination {
            cursor,
            page_size: if kind == PaginationType::Cursor { page_size } else { None },
            is_previous_page: Some(previous),
            include_total_count: Some(total_count),
        }
    });

    Ok(RawPaginationRequest {
        pagination_type: Some(RawDiscriminator::from(kind)),
        offset_pagination,
        cursor_pagination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreSettings;
    use crate::pagination::{validate, PaginationRequest, RequestDefaults};

    #[test]
    fn test_page_request_offset() {
        let raw = page_request("offset", Some(3), Some(20), None, false, false).unwrap();
        let request = validate(raw, RequestDefaults::default()).unwrap();
        let PaginationRequest::Offset(offset) = request else {
            panic!("Expected offset request");
        };
        assert_eq!(offset.page(), 3);
        assert_eq!(offset.page_size(), 20);
    }

    #[test]
    fn test_page_request_cursor() {
        let raw = page_request("1", None, Some(10), Some(99), true, true).unwrap();
        let request = validate(raw, RequestDefaults::default()).unwrap();
        let PaginationRequest::Cursor(cursor) = request else {
            panic!("Expected cursor request");
        };
        assert_eq!(cursor.cursor(), 99);
        assert!(cursor.is_previous_page());
        assert!(cursor.include_total_count());
    }

    #[test]
    fn test_page_request_mixed_flags_rejected() {
        let raw = page_request("offset", Some(1), None, Some(5), false, false).unwrap();
        assert!(validate(raw, RequestDefaults::default()).is_err());

        let raw = page_request("cursor", Some(1), None, None, false, false).unwrap();
        assert!(validate(raw, RequestDefaults::default()).is_err());
    }

    #[test]
    fn test_page_request_unknown_type() {
        assert!(page_request("keyset", None, None, None, false, false).is_err());
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let config = ServiceConfig {
            store: StoreSettings {
                seed: 75,
                ..StoreSettings::default()
            },
            ..ServiceConfig::default()
        };
        let store = open_store(&config).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 75);
    }

    #[tokio::test]
    async fn test_open_duckdb_store_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServiceConfig::default();
        config.store.kind = StoreKind::Duckdb;
        config.store.path = Some(dir.path().join("users.duckdb"));
        config.store.seed = 60;
        config.pagination.count_cache_ttl_secs = Some(60);

        {
            let store = open_store(&config).await.unwrap();
            assert_eq!(store.count().await.unwrap(), 60);
        }
        let store = open_store(&config).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 60);
    }
}
