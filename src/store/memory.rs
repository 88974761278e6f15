//! In-memory record store
//!
//! Keeps records in a vector sorted by id. Used for tests, benchmarks and
//! the default `serve` configuration.

use super::types::RecordStore;
use crate::error::{Error, Result};
use crate::types::{Keyed, User};
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;

/// Record store backed by a sorted `Vec`
pub struct MemoryStore<T> {
    inner: RwLock<Records<T>>,
}

struct Records<T> {
    rows: Vec<T>,
    /// Highest id ever stored. Removing rows never lowers it.
    high_water: i64,
}

impl<T: Keyed> MemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Records {
                rows: Vec::new(),
                high_water: 0,
            }),
        }
    }

    /// Create a store from records in any order.
    ///
    /// Fails if two records share an id.
    pub fn from_records(mut records: Vec<T>) -> Result<Self> {
        records.sort_by_key(Keyed::id);
        if let Some(pair) = records.windows(2).find(|w| w[0].id() == w[1].id()) {
            return Err(Error::storage(format!("duplicate record id {}", pair[0].id())));
        }
        let high_water = records.last().map_or(0, Keyed::id).max(0);
        Ok(Self {
            inner: RwLock::new(Records {
                rows: records,
                high_water,
            }),
        })
    }

    /// Delete a record by id. Returns whether it existed.
    ///
    /// The id stays retired: later inserts continue above it.
    pub async fn remove(&self, id: i64) -> bool {
        let mut inner = self.inner.write().await;
        match inner.rows.binary_search_by_key(&id, Keyed::id) {
            Ok(index) => {
                inner.rows.remove(index);
                true
            }
            Err(_) => false,
        }
    }
}

impl MemoryStore<User> {
    /// Insert a user, ignoring its `id`. Returns the assigned id.
    pub async fn insert(&self, mut user: User) -> Result<i64> {
        let mut inner = self.inner.write().await;
        let id = inner
            .high_water
            .checked_add(1)
            .ok_or_else(|| Error::storage("user id space exhausted"))?;
        user.id = id;
        inner.rows.push(user);
        inner.high_water = id;
        Ok(id)
    }

    /// Flip a user out of the active subset. Returns whether it existed.
    pub async fn deactivate(&self, id: i64) -> bool {
        let mut inner = self.inner.write().await;
        match inner.rows.binary_search_by_key(&id, Keyed::id) {
            Ok(index) => {
                inner.rows[index].is_active = false;
                true
            }
            Err(_) => false,
        }
    }
}

impl<T: Keyed> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> RecordStore for MemoryStore<T>
where
    T: Keyed + Clone + Serialize + Send + Sync + 'static,
{
    type Record = T;

    async fn scan_after(&self, after: i64, limit: usize) -> Result<Vec<T>> {
        let inner = self.inner.read().await;
        let start = inner.rows.partition_point(|r| r.id() <= after);
        Ok(inner.rows[start..]
            .iter()
            .filter(|r| r.is_active())
            .take(limit)
            .cloned()
            .collect())
    }

    async fn scan_offset(&self, skip: u64, take: usize) -> Result<Vec<T>> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .iter()
            .filter(|r| r.is_active())
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        let inner = self.inner.read().await;
        Ok(inner.rows.iter().filter(|r| r.is_active()).count() as u64)
    }
}
