//! DuckDB-backed user store
//!
//! Keeps users in a single `users` table. Ids come from a sequence, so they
//! start at 1, strictly increase and are never reused.
//! DuckDB calls are blocking; each one runs on the blocking pool behind a
//! mutex around the single connection.

use super::seed::{seed_user, SEED_BATCH_SIZE};
use super::types::RecordStore;
use crate::error::{Error, Result};
use crate::types::User;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use duckdb::{params, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA: &str = "
CREATE SEQUENCE IF NOT EXISTS users_id_seq START 1;
CREATE TABLE IF NOT EXISTS users (
    id BIGINT PRIMARY KEY DEFAULT nextval('users_id_seq'),
    username VARCHAR NOT NULL,
    email VARCHAR NOT NULL,
    first_name VARCHAR NOT NULL,
    last_name VARCHAR NOT NULL,
    date_of_birth VARCHAR NOT NULL,
    phone_number VARCHAR NOT NULL,
    address VARCHAR,
    city VARCHAR,
    state VARCHAR,
    zip_code VARCHAR,
    country VARCHAR,
    profile_picture_url VARCHAR,
    is_email_verified BOOLEAN NOT NULL,
    is_active BOOLEAN NOT NULL,
    created_at VARCHAR NOT NULL,
    created_by VARCHAR NOT NULL,
    updated_at VARCHAR NOT NULL,
    updated_by VARCHAR NOT NULL,
    last_login_at VARCHAR,
    role VARCHAR NOT NULL
);
";

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, date_of_birth, \
    phone_number, address, city, state, zip_code, country, profile_picture_url, \
    is_email_verified, is_active, created_at, created_by, updated_at, updated_by, \
    last_login_at, role";

const INSERT_USER: &str = "INSERT INTO users (id, username, email, first_name, last_name, \
    date_of_birth, phone_number, address, city, state, zip_code, country, \
    profile_picture_url, is_email_verified, is_active, created_at, created_by, \
    updated_at, updated_by, last_login_at, role) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// User store over a DuckDB database
#[derive(Clone)]
pub struct DuckDbStore {
    conn: Arc<Mutex<Connection>>,
    /// Database location (for logging)
    location: String,
}

impl DuckDbStore {
    /// Open (or create) a database file and ensure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            Error::storage(format!("Failed to open DuckDB at {}: {e}", path.display()))
        })?;
        Self::with_connection(conn, path.display().to_string())
    }

    /// Create a transient in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::storage(format!("Failed to create DuckDB connection: {e}")))?;
        Self::with_connection(conn, ":memory:".to_string())
    }

    fn with_connection(conn: Connection, location: String) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| Error::storage(format!("Failed to create users schema: {e}")))?;
        tracing::debug!(location = %location, "DuckDB user store ready");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location,
        })
    }

    /// Where the database lives
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Insert a user, ignoring its `id`. Returns the assigned id.
    pub async fn insert(&self, mut user: User) -> Result<i64> {
        self.with_conn(move |conn| {
            user.id = next_id(conn)?;
            insert_user(conn, &user)?;
            Ok(user.id)
        })
        .await
    }

    /// Insert `count` seeded users in batches. Returns the number inserted.
    ///
    /// Each seeded user is labelled with the id it receives, so seeding a
    /// non-empty table continues the `user{id}` series.
    pub async fn seed(&self, count: usize) -> Result<usize> {
        self.with_conn(move |conn| {
            let now = Utc::now();
            let mut remaining = count;
            while remaining > 0 {
                let batch = remaining.min(SEED_BATCH_SIZE);
                let tx = conn.transaction()?;
                for _ in 0..batch {
                    let id = next_id(&tx)?;
                    insert_user(&tx, &seed_user(id, now))?;
                }
                tx.commit()?;
                remaining -= batch;
            }
            Ok(count)
        })
        .await
    }

    /// Mark a user inactive. Returns whether a row changed.
    pub async fn deactivate(&self, id: i64) -> Result<bool> {
        self.with_conn(move |conn| {
            let changed = conn.execute(
                "UPDATE users SET is_active = false WHERE id = ? AND is_active",
                params![id],
            )?;
            Ok(changed > 0)
        })
        .await
    }

    async fn with_conn<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Connection) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| Error::storage("DuckDB connection mutex poisoned"))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| Error::storage(format!("DuckDB task failed: {e}")))?
    }
}

#[async_trait]
impl RecordStore for DuckDbStore {
    type Record = User;

    async fn scan_after(&self, after: i64, limit: usize) -> Result<Vec<User>> {
        self.with_conn(move |conn| {
            let sql = format!(
                "SELECT {USER_COLUMNS} FROM users WHERE is_active AND id > ? ORDER BY id LIMIT ?"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![after, limit as i64], read_row)?;
            let users = rows.map(|row| row?.into_user()).collect::<Result<Vec<_>>>();
            users
        })
        .await
    }

    async fn scan_offset(&self, skip: u64, take: usize) -> Result<Vec<User>> {
        self.with_conn(move |conn| {
            let sql = format!(
                "SELECT {USER_COLUMNS} FROM users WHERE is_active ORDER BY id LIMIT ? OFFSET ?"
            );
            let mut stmt = conn.prepare(&sql)?;
            let skip = i64::try_from(skip).unwrap_or(i64::MAX);
            let rows = stmt.query_map(params![take as i64, skip], read_row)?;
            let users = rows.map(|row| row?.into_user()).collect::<Result<Vec<_>>>();
            users
        })
        .await
    }

    async fn count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM users WHERE is_active", [], |row| {
                    row.get(0)
                })?;
            Ok(count.max(0) as u64)
        })
        .await
    }
}

fn next_id(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT nextval('users_id_seq')", [], |row| row.get(0))?)
}

fn insert_user(conn: &Connection, user: &User) -> Result<()> {
    conn.execute(
        INSERT_USER,
        params![
            user.id,
            user.username,
            user.email,
            user.first_name,
            user.last_name,
            user.date_of_birth.to_string(),
            user.phone_number,
            user.address,
            user.city,
            user.state,
            user.zip_code,
            user.country,
            user.profile_picture_url,
            user.is_email_verified,
            user.is_active,
            user.created_at.to_rfc3339(),
            user.created_by,
            user.updated_at.to_rfc3339(),
            user.updated_by,
            user.last_login_at.map(|t| t.to_rfc3339()),
            user.role,
        ],
    )?;
    Ok(())
}

/// A `users` row with dates still in their stored text form
struct UserRow {
    id: i64,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    date_of_birth: String,
    phone_number: String,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    country: Option<String>,
    profile_picture_url: Option<String>,
    is_email_verified: bool,
    is_active: bool,
    created_at: String,
    created_by: String,
    updated_at: String,
    updated_by: String,
    last_login_at: Option<String>,
    role: String,
}

fn read_row(row: &Row<'_>) -> duckdb::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        date_of_birth: row.get(5)?,
        phone_number: row.get(6)?,
        address: row.get(7)?,
        city: row.get(8)?,
        state: row.get(9)?,
        zip_code: row.get(10)?,
        country: row.get(11)?,
        profile_picture_url: row.get(12)?,
        is_email_verified: row.get(13)?,
        is_active: row.get(14)?,
        created_at: row.get(15)?,
        created_by: row.get(16)?,
        updated_at: row.get(17)?,
        updated_by: row.get(18)?,
        last_login_at: row.get(19)?,
        role: row.get(20)?,
    })
}

impl UserRow {
    fn into_user(self) -> Result<User> {
        let id = self.id;
        Ok(User {
            id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d")
                .map_err(|e| Error::storage(format!("user {id}: bad date_of_birth: {e}")))?,
            phone_number: self.phone_number,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            country: self.country,
            profile_picture_url: self.profile_picture_url,
            is_email_verified: self.is_email_verified,
            is_active: self.is_active,
            created_at: parse_timestamp(id, "created_at", &self.created_at)?,
            created_by: self.created_by,
            updated_at: parse_timestamp(id, "updated_at", &self.updated_at)?,
            updated_by: self.updated_by,
            last_login_at: self
                .last_login_at
                .as_deref()
                .map(|t| parse_timestamp(id, "last_login_at", t))
                .transpose()?,
            role: self.role,
        })
    }
}

fn parse_timestamp(id: i64, column: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::storage(format!("user {id}: bad {column}: {e}")))
}
