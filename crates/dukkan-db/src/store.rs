//! # Key-Value Store
//!
//! String keys, JSON values, one SQLite table.
//!
//! ## Read Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KvStore::get(key, default)          lenient                            │
//! │    missing key      → default                                           │
//! │    unparsable JSON  → warn!, default (storage untouched)                │
//! │    SQLite failure   → warn!, default                                    │
//! │                                                                         │
//! │  KvTransaction::load(key, default)   strict                             │
//! │    missing key      → default                                           │
//! │    unparsable JSON  → DbError::Decode (transaction rolled back)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every read-modify-write goes through a [`KvTransaction`]. Several keys
//! written in one transaction land together or not at all.
//!
//! ## Writers
//! ```text
//! begin() ──► wait for the writer lock ──► BEGIN ──► load / set ──► COMMIT
//!                  ▲                                                  │
//!                  └──────────── released when the transaction ◄──────┘
//!                                 commits or is dropped
//! ```
//! SQLite starts a deferred transaction as a reader and upgrades to a
//! writer on the first write. Two such transactions over one WAL file
//! cannot both upgrade; the loser fails with `database is locked` without
//! waiting. Writers on one [`Database`](crate::Database) therefore queue on
//! a shared lock instead, and plain [`KvStore::set`] / [`KvStore::remove`]
//! take the same lock. Lenient reads never wait for it.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, error, warn};

use crate::error::{DbError, DbResult};

const SELECT_VALUE: &str = "SELECT value FROM kv_store WHERE key = ?1";

const UPSERT_VALUE: &str = r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
"#;

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> DbResult<String> {
    serde_json::to_string(value).map_err(|e| DbError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> DbResult<T> {
    serde_json::from_str(raw).map_err(|e| DbError::Decode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Store
// =============================================================================

/// Lock shared by every store handle of one database.
pub(crate) type WriterLock = Arc<Mutex<()>>;

#[derive(Debug, Clone)]
pub struct KvStore {
    pool: SqlitePool,
    writer: WriterLock,
}

impl KvStore {
    pub(crate) fn new(pool: SqlitePool, writer: WriterLock) -> Self {
        KvStore { pool, writer }
    }

    /// Reads `key`, falling back to `default` on a missing key or any
    /// read/parse failure. Never writes.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get_strict(key).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key = %key, "Key not set, using default");
                default
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read stored value, using default");
                default
            }
        }
    }

    /// Reads `key` and surfaces every failure.
    pub async fn get_strict<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        let raw: Option<String> = sqlx::query_scalar(SELECT_VALUE)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        raw.map(|raw| decode(key, &raw)).transpose()
    }

    /// Serializes `value` and upserts it under `key`.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let result = self.write(key, value).await;
        if let Err(e) = &result {
            error!(key = %key, error = %e, "Failed to save value");
        }
        result
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = encode(key, value)?;
        debug!(key = %key, bytes = raw.len(), "Saving value");
        let _writer = self.writer.lock().await;
        sqlx::query(UPSERT_VALUE)
            .bind(key)
            .bind(raw)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Deletes `key`. Returns false if it was not set.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        debug!(key = %key, "Removing key");
        let _writer = self.writer.lock().await;
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn contains(&self, key: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }

    /// Opens a write transaction, waiting for any other writer to finish.
    pub async fn begin(&self) -> DbResult<KvTransaction> {
        let writer = Arc::clone(&self.writer).lock_owned().await;
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        Ok(KvTransaction {
            tx,
            _writer: writer,
        })
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A write transaction over several keys. Dropped without
/// [`commit`](KvTransaction::commit) means rolled back.
pub struct KvTransaction {
    tx: Transaction<'static, Sqlite>,
    // Declared after `tx` so the rollback is queued before the lock is released.
    _writer: OwnedMutexGuard<()>,
}

impl KvTransaction {
    /// Strict read: missing key gives `default`, unreadable JSON is an error.
    pub async fn load<T: DeserializeOwned>(&mut self, key: &str, default: T) -> DbResult<T> {
        let raw: Option<String> = sqlx::query_scalar(SELECT_VALUE)
            .bind(key)
            .fetch_optional(&mut *self.tx)
            .await?;
        match raw {
            Some(raw) => decode(key, &raw),
            None => Ok(default),
        }
    }

    pub async fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> DbResult<()> {
        let raw = encode(key, value)?;
        debug!(key = %key, bytes = raw.len(), "Staging value");
        sqlx::query(UPSERT_VALUE)
            .bind(key)
            .bind(raw)
            .bind(Utc::now())
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    pub async fn commit(self) -> DbResult<()> {
        self.tx.commit().await.map_err(|e| {
            error!(error = %e, "Commit failed");
            DbError::TransactionFailed(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Shelf {
        label: String,
        count: i64,
    }

    async fn store() -> KvStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.store()
    }

    #[tokio::test]
    async fn test_get_after_set_round_trips() {
        let store = store().await;
        let shelf = Shelf {
            label: "رف".to_string(),
            count: 3,
        };
        store.set("shelf", &shelf).await.unwrap();

        let back: Shelf = store
            .get(
                "shelf",
                Shelf {
                    label: String::new(),
                    count: 0,
                },
            )
            .await;
        assert_eq!(back, shelf);
    }

    #[tokio::test]
    async fn test_missing_key_returns_default_without_writing() {
        let store = store().await;
        let first: Vec<i64> = store.get("nothing", vec![7]).await;
        let second: Vec<i64> = store.get("nothing", vec![7]).await;
        assert_eq!(first, vec![7]);
        assert_eq!(first, second);
        assert!(!store.contains("nothing").await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_value_falls_back_and_is_kept() {
        let store = store().await;
        store.set("numbers", "not a list").await.unwrap();

        let value: Vec<i64> = store.get("numbers", Vec::new()).await;
        assert!(value.is_empty());

        let raw: Option<String> = store.get_strict("numbers").await.unwrap();
        assert_eq!(raw.as_deref(), Some("not a list"));
    }

    #[tokio::test]
    async fn test_strict_load_rejects_corrupt_value() {
        let store = store().await;
        store.set("numbers", &"oops").await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let err = tx.load::<Vec<i64>>("numbers", Vec::new()).await.unwrap_err();
        assert!(matches!(err, DbError::Decode { ref key, .. } if key == "numbers"));
    }

    #[tokio::test]
    async fn test_transaction_commits_all_keys_or_none() {
        let store = store().await;

        let mut tx = store.begin().await.unwrap();
        tx.set("a", &1).await.unwrap();
        tx.set("b", &2).await.unwrap();
        drop(tx);
        assert!(store.keys().await.unwrap().is_empty());

        let mut tx = store.begin().await.unwrap();
        tx.set("a", &1).await.unwrap();
        tx.set("b", &2).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_on_file_database() {
        let path = std::env::temp_dir().join(format!("dukkan-kv-{}.db", uuid::Uuid::new_v4()));
        let db = Database::new(DbConfig::new(&path).max_connections(8))
            .await
            .unwrap();
        let store = db.store();
        store.set("counter", &0i64).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = db.store();
            handles.push(tokio::spawn(async move {
                let mut tx = store.begin().await?;
                let n: i64 = tx.load("counter", 0).await?;
                tokio::task::yield_now().await;
                tx.set("counter", &(n + 1)).await?;
                tx.commit().await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let n: i64 = store.get("counter", -1).await;
        assert_eq!(n, 16);

        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    #[tokio::test]
    async fn test_remove() {
        let store = store().await;
        store.set("k", &true).await.unwrap();
        assert!(store.remove("k").await.unwrap());
        assert!(!store.remove("k").await.unwrap());
    }
}
