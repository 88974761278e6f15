//! Tests for store module

use super::*;
use crate::types::{Keyed, User};
use std::sync::Arc;
use std::time::Duration;

fn ids(records: &[User]) -> Vec<i64> {
    records.iter().map(Keyed::id).collect()
}

// ============================================================================
// MemoryStore Tests
// ============================================================================

#[tokio::test]
async fn test_memory_scan_after() {
    let store = MemoryStore::from_records(seed_users(10)).unwrap();

    assert_eq!(ids(&store.scan_after(0, 3).await.unwrap()), vec![1, 2, 3]);
    assert_eq!(ids(&store.scan_after(8, 5).await.unwrap()), vec![9, 10]);
    assert!(store.scan_after(10, 5).await.unwrap().is_empty());
    assert_eq!(ids(&store.scan_after(-20, 2).await.unwrap()), vec![1, 2]);
}

#[tokio::test]
async fn test_memory_scan_offset() {
    let store = MemoryStore::from_records(seed_users(10)).unwrap();

    assert_eq!(ids(&store.scan_offset(0, 4).await.unwrap()), vec![1, 2, 3, 4]);
    assert_eq!(ids(&store.scan_offset(8, 4).await.unwrap()), vec![9, 10]);
    assert!(store.scan_offset(10, 4).await.unwrap().is_empty());
    assert!(store.scan_offset(u64::MAX, 4).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_memory_skips_inactive() {
    let store = MemoryStore::from_records(seed_users(6)).unwrap();
    assert!(store.deactivate(2).await);
    assert!(store.deactivate(3).await);
    assert!(!store.deactivate(42).await);

    assert_eq!(store.count().await.unwrap(), 4);
    assert_eq!(ids(&store.scan_after(0, 3).await.unwrap()), vec![1, 4, 5]);
    assert_eq!(ids(&store.scan_offset(1, 2).await.unwrap()), vec![4, 5]);
}

#[tokio::test]
async fn test_memory_insert_assigns_next_id() {
    let store = MemoryStore::from_records(seed_users(3)).unwrap();
    let now = chrono::Utc::now();

    // The incoming id is ignored
    assert_eq!(store.insert(seed_user(99, now)).await.unwrap(), 4);
    assert_eq!(store.insert(seed_user(1, now)).await.unwrap(), 5);
    assert_eq!(ids(&store.scan_after(3, 10).await.unwrap()), vec![4, 5]);

    let empty = MemoryStore::<User>::new();
    assert_eq!(empty.insert(seed_user(0, now)).await.unwrap(), 1);
}

#[tokio::test]
async fn test_memory_remove() {
    let store = MemoryStore::from_records(seed_users(3)).unwrap();
    assert!(store.remove(2).await);
    assert!(!store.remove(2).await);
    assert_eq!(ids(&store.scan_after(0, 10).await.unwrap()), vec![1, 3]);
}

#[tokio::test]
async fn test_memory_removed_tail_id_is_not_reused() {
    let store = MemoryStore::from_records(seed_users(3)).unwrap();
    let now = chrono::Utc::now();

    assert!(store.remove(3).await);
    assert_eq!(store.insert(seed_user(3, now)).await.unwrap(), 4);
    assert_eq!(ids(&store.scan_after(0, 10).await.unwrap()), vec![1, 2, 4]);

    assert!(store.remove(4).await);
    assert!(store.remove(2).await);
    assert_eq!(store.insert(seed_user(0, now)).await.unwrap(), 5);
}

#[test]
fn test_memory_rejects_duplicate_ids() {
    let mut users = seed_users(3);
    users[2].id = 1;
    assert!(MemoryStore::from_records(users).is_err());
}

#[test]
fn test_memory_sorts_input() {
    let mut users = seed_users(5);
    users.reverse();
    let store = MemoryStore::from_records(users).unwrap();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let page = runtime.block_on(store.scan_after(0, 5)).unwrap();
    assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
}

// ============================================================================
// DuckDbStore Tests
// ============================================================================

#[tokio::test]
async fn test_duckdb_seed_and_scan() {
    let store = DuckDbStore::open_in_memory().unwrap();
    assert_eq!(store.seed(120).await.unwrap(), 120);

    assert_eq!(store.count().await.unwrap(), 120);

    let page = store.scan_after(0, 3).await.unwrap();
    assert_eq!(ids(&page), vec![1, 2, 3]);
    assert_eq!(page[0].username, "user1");
    assert_eq!(page[2].email, "user3@example.com");
    assert_eq!(page[0].date_of_birth.to_string(), "1990-01-01");

    assert_eq!(ids(&store.scan_after(118, 10).await.unwrap()), vec![119, 120]);
    assert_eq!(ids(&store.scan_offset(50, 2).await.unwrap()), vec![51, 52]);
}

#[tokio::test]
async fn test_duckdb_deactivate_hides_rows() {
    let store = DuckDbStore::open_in_memory().unwrap();
    store.seed(5).await.unwrap();

    assert!(store.deactivate(2).await.unwrap());
    assert!(!store.deactivate(2).await.unwrap());

    assert_eq!(store.count().await.unwrap(), 4);
    assert_eq!(ids(&store.scan_after(0, 10).await.unwrap()), vec![1, 3, 4, 5]);
}

#[tokio::test]
async fn test_duckdb_insert_assigns_increasing_ids() {
    let store = DuckDbStore::open_in_memory().unwrap();
    store.seed(2).await.unwrap();

    let id = store
        .insert(seed_user(0, chrono::Utc::now()))
        .await
        .unwrap();
    assert_eq!(id, 3);
}

#[tokio::test]
async fn test_duckdb_seed_continues_labels() {
    let store = DuckDbStore::open_in_memory().unwrap();
    store.seed(3).await.unwrap();
    store.seed(2).await.unwrap();

    let users = store.scan_after(0, 10).await.unwrap();
    assert_eq!(ids(&users), vec![1, 2, 3, 4, 5]);
    for user in &users {
        assert_eq!(user.username, format!("user{}", user.id));
        assert_eq!(user.email, format!("user{}@example.com", user.id));
    }
}

#[tokio::test]
async fn test_duckdb_file_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.duckdb");

    {
        let store = DuckDbStore::open(&path).unwrap();
        store.seed(10).await.unwrap();
    }

    let reopened = DuckDbStore::open(&path).unwrap();
    assert_eq!(reopened.count().await.unwrap(), 10);
    assert!(reopened.location().ends_with("users.duckdb"));
}

// ============================================================================
// CachedCountStore Tests
// ============================================================================

#[tokio::test]
async fn test_cached_count_is_stale_within_ttl() {
    let inner = Arc::new(MemoryStore::from_records(seed_users(10)).unwrap());
    let store = CachedCountStore::new(Arc::clone(&inner), Duration::from_secs(3600));

    assert_eq!(store.count().await.unwrap(), 10);
    inner.deactivate(1).await;
    assert_eq!(store.count().await.unwrap(), 10);

    store.invalidate().await;
    assert_eq!(store.count().await.unwrap(), 9);
}

#[tokio::test]
async fn test_cached_count_zero_ttl_always_refreshes() {
    let inner = Arc::new(MemoryStore::from_records(seed_users(10)).unwrap());
    let store = CachedCountStore::new(Arc::clone(&inner), Duration::ZERO);

    assert_eq!(store.count().await.unwrap(), 10);
    inner.deactivate(1).await;
    assert_eq!(store.count().await.unwrap(), 9);
}

#[tokio::test]
async fn test_cached_scans_pass_through() {
    let inner = Arc::new(MemoryStore::from_records(seed_users(10)).unwrap());
    let store = CachedCountStore::new(Arc::clone(&inner), Duration::from_secs(3600));

    inner.deactivate(2).await;
    assert_eq!(ids(&store.scan_after(0, 2).await.unwrap()), vec![1, 3]);
    assert_eq!(ids(&store.scan_offset(0, 2).await.unwrap()), vec![1, 3]);
    assert_eq!(store.inner().count().await.unwrap(), 9);
}
