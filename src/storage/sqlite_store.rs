use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::KeyValueStore;
use crate::error::{CorkboardError, Result};

const BOARD_DB: &str = "board.db";

/// SQLite-backed key/value store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database inside an existing board directory
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(CorkboardError::NotInitialized);
        }
        let path = dir.join(BOARD_DB);
        let conn = Connection::open(path)?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_put_overwrites() {
        let mut store = SqliteStore::in_memory().unwrap();

        store.put("notes", "[1]").unwrap();
        store.put("notes", "[2]").unwrap();

        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let mut store = SqliteStore::open(tmp.path()).unwrap();
            store.put("notes", "[]").unwrap();
        }

        let store = SqliteStore::open(tmp.path()).unwrap();
        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[]"));
        assert!(tmp.path().join(BOARD_DB).exists());
    }
}
