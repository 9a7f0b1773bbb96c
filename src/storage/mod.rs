//! Persistence gateway.
//!
//! Boards are saved through a plain key/value contract so the backing medium
//! can change without touching the board. [`PersistenceGateway`] layers typed
//! JSON access over any [`KeyValueStore`] and owns the "malformed data reads
//! as absent" policy.

mod json_store;
mod memory;
mod sqlite_store;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite_store::SqliteStore;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Backend;
use crate::error::Result;

/// Key the board's note collection is stored under.
pub const NOTES_KEY: &str = "notes";

/// Raw string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value)
    }
}

/// Open the store for `backend` inside a board directory.
pub fn open_store(board_dir: &Path, backend: Backend) -> Result<Box<dyn KeyValueStore>> {
    Ok(match backend {
        Backend::Json => Box::new(JsonFileStore::open(board_dir)?),
        Backend::Sqlite => Box::new(SqliteStore::open(board_dir)?),
    })
}

/// Typed JSON access over a [`KeyValueStore`].
pub struct PersistenceGateway {
    store: Box<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// In-memory gateway, nothing survives the process.
    pub fn ephemeral() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Read and decode the value under `key`.
    ///
    /// Missing keys, unreadable stores and undecodable payloads all come back
    /// as `None`. The failure is logged, never returned.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        debug!(key, "reading from store");
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read from store");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "stored data is malformed, ignoring it");
                None
            }
        }
    }

    /// Encode `value` and write it under `key`.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        debug!(key, "saving to store");
        let raw = serde_json::to_string(value)?;
        self.store.put(key, &raw)
    }

    /// Direct access to the underlying store.
    pub fn store_mut(&mut self) -> &mut (dyn KeyValueStore + 'static) {
        &mut *self.store
    }
}
