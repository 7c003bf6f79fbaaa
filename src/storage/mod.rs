// src/storage/mod.rs
//! Local key/value persistence
//!
//! The vault keeps exactly two values: the exported key material and the
//! serialized entry list. Both live in the same [`LocalStore`], so whoever
//! can read the ciphertext can also read the key.

use std::sync::Arc;

use tracing::debug;

use crate::config::StorageConfig;
use crate::enums::StorageBackend;
use crate::error::{CoreError, Result};

mod file;
mod memory;
mod sqlite;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// File name of the SQLite database inside the data directory
pub const SQLITE_FILE_NAME: &str = "vault.db";

/// String-keyed, string-valued local storage.
///
/// Every call is a whole-value read or write; there are no partial updates.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Store `value` only if `key` holds nothing yet, atomically with respect
    /// to other writers of the same store. Returns whatever value `key` holds
    /// afterwards: `value` if this call won, the earlier value otherwise.
    fn set_if_absent(&self, key: &str, value: &str) -> Result<String>;

    /// Returns whether a value was removed.
    fn remove(&self, key: &str) -> Result<bool>;
}

pub type StoreHandle = Arc<dyn LocalStore>;

/// Open the backend selected in the `[storage]` config section
pub fn open_store(config: &StorageConfig) -> Result<StoreHandle> {
    debug!(backend = ?config.backend, path = %config.path.display(), "opening local store");
    let store: StoreHandle = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::open(&config.path)?),
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(config.path.join(SQLITE_FILE_NAME))?),
    };
    Ok(store)
}

/// Storage keys end up as file names and SQL parameters; keep them boring.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(CoreError::Config(format!("invalid storage key '{key}'")))
    }
}
