use anyhow::{Context, Result};
use chrono::Utc;
use log::error;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use super::Database;

fn upsert(conn: &mut Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             updated_at = excluded.updated_at",
        params![key, value, Utc::now().to_rfc3339()],
    )
    .with_context(|| format!("failed to write key {key}"))?;
    Ok(())
}

fn remove(conn: &mut Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
        .with_context(|| format!("failed to delete key {key}"))?;
    Ok(())
}

impl Database {
    pub async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.execute(move |conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()
                .with_context(|| format!("failed to read key {key}"))?;
            Ok(value)
        })
        .await
    }

    pub async fn put_value(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.execute(move |conn| upsert(conn, &key, &value)).await
    }

    pub async fn delete_value(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.execute(move |conn| remove(conn, &key)).await
    }

    pub fn put_value_detached(&self, key: &'static str, value: String) {
        self.execute_detached(key, move |conn| upsert(conn, key, &value));
    }

    pub fn delete_value_detached(&self, key: &'static str) {
        self.execute_detached(key, move |conn| remove(conn, key));
    }

    /// Reads and decodes a JSON blob. `Ok(None)` when the key was never written.
    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_value(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .with_context(|| format!("malformed JSON stored under {key}")),
            None => Ok(None),
        }
    }

    /// Like [`Database::read_json`] but never fails: errors are logged and
    /// treated as a missing key so the caller falls back to its defaults.
    pub async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.read_json(key).await {
            Ok(value) => value,
            Err(err) => {
                error!("Failed to load {key}: {err:#}");
                None
            }
        }
    }

    /// Serializes now and queues the write without waiting for it.
    pub fn save_json_detached<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) {
        match serde_json::to_string(value) {
            Ok(serialized) => self.put_value_detached(key, serialized),
            Err(err) => error!("Failed to serialize {key}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_value("k").await.unwrap(), None);

        db.put_value("k", "1".into()).await.unwrap();
        db.put_value("k", "2".into()).await.unwrap();
        assert_eq!(db.get_value("k").await.unwrap().as_deref(), Some("2"));

        db.delete_value("k").await.unwrap();
        assert_eq!(db.get_value("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn detached_write_is_visible_to_later_reads() {
        let db = Database::open_in_memory().unwrap();
        db.save_json_detached("xstep_test", &vec![1, 2, 3]);

        let stored: Option<Vec<i32>> = db.read_json("xstep_test").await.unwrap();
        assert_eq!(stored, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn malformed_json_loads_as_missing() {
        let db = Database::open_in_memory().unwrap();
        db.put_value("broken", "{not json".into()).await.unwrap();

        assert!(db.read_json::<Vec<i32>>("broken").await.is_err());
        assert_eq!(db.load_json::<Vec<i32>>("broken").await, None);
    }
}
