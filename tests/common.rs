// tests/common.rs
//! Shared test utilities: logging setup and vault fixtures

use std::sync::Arc;

use credential_vault::enums::StorageBackend;
use credential_vault::{
    Config, FileStore, MemoryStore, SqliteStore, StoreHandle, Vault, VaultEntryData,
};
use tempfile::TempDir;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
#[allow(dead_code)]
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer()) // works in `cargo test`
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok(); // idempotent

    #[cfg(not(feature = "logging"))]
    { /* no-op */ }
}

#[allow(dead_code)] // Fields are used depending on the test
pub struct TestVault {
    pub vault: Vault,
    pub store: StoreHandle,
    pub config: Config,
    backend: StorageBackend,
    dir: Option<TempDir>,
}

#[allow(dead_code)]
impl TestVault {
    pub fn new(backend: StorageBackend) -> Self {
        Self::with_config(backend, Config::ephemeral())
    }

    pub fn with_config(backend: StorageBackend, mut config: Config) -> Self {
        setup();
        let (store, dir): (StoreHandle, Option<TempDir>) = match backend {
            StorageBackend::Memory => (Arc::new(MemoryStore::new()), None),
            StorageBackend::File => {
                let dir = tempfile::tempdir().expect("tempdir");
                let store = FileStore::open(dir.path()).expect("open file store");
                (Arc::new(store), Some(dir))
            }
            StorageBackend::Sqlite => {
                let dir = tempfile::tempdir().expect("tempdir");
                let store = SqliteStore::open(dir.path().join("vault.db")).expect("open sqlite");
                (Arc::new(store), Some(dir))
            }
            other => panic!("no fixture for {other:?}"),
        };
        config.storage.backend = backend;
        if let Some(dir) = &dir {
            config.storage.path = dir.path().to_path_buf();
        }

        let vault = Vault::with_store(store.clone(), &config).expect("build vault");
        Self {
            vault,
            store,
            config,
            backend,
            dir,
        }
    }

    /// A second, independent vault over the same storage
    pub fn sibling(&self) -> Vault {
        Vault::with_store(self.store.clone(), &self.config).expect("build sibling vault")
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }
}

#[allow(dead_code)]
pub const ALL_BACKENDS: [StorageBackend; 3] = [
    StorageBackend::Memory,
    StorageBackend::File,
    StorageBackend::Sqlite,
];

#[allow(dead_code)]
pub fn record(title: &str) -> VaultEntryData {
    VaultEntryData::new(
        title,
        format!("{}@example.com", title.to_lowercase().replace(' ', ".")),
        "correct horse battery staple",
        format!("https://{}.example.com", title.to_lowercase().replace(' ', "-")),
        "",
    )
    .expect("valid record")
}
