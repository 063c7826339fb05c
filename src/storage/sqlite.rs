use crate::error::StorageError;
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Result};
use std::path::Path;
use tokio::sync::Mutex;

/// Key-value store backed by a single SQLite table.
///
/// Each `get`/`set` is serialized on the connection, but nothing spans a
/// caller's read-modify-write.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> std::result::Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Backend(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> std::result::Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        let conn = self.conn.lock().await;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, now()],
        )?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> std::result::Result<(), StorageError> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM kv WHERE key = ?", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_create_kv_table() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"kv".to_string()));
    }

    #[tokio::test]
    async fn test_set_get_overwrite_remove() {
        let store = SqliteStore::open_in_memory().unwrap();

        assert_eq!(store.get("wordLists").await.unwrap(), None);

        store.set("wordLists", "[]").await.unwrap();
        assert_eq!(store.get("wordLists").await.unwrap().as_deref(), Some("[]"));

        store.set("wordLists", "[1]").await.unwrap();
        assert_eq!(store.get("wordLists").await.unwrap().as_deref(), Some("[1]"));

        store.remove("wordLists").await.unwrap();
        assert_eq!(store.get("wordLists").await.unwrap(), None);

        store.remove("wordLists").await.unwrap();
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("glosario.db");

        {
            let store = SqliteStore::open(&db_path).unwrap();
            store.set("wordLists", r#"[{"id":"default"}]"#).await.unwrap();
        }

        let store = SqliteStore::open(&db_path).unwrap();
        let value = store.get("wordLists").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"[{"id":"default"}]"#));
    }
}
