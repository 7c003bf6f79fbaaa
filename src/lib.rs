// src/lib.rs
//! credential-vault: a local, single-key password vault
//!
//! Features:
//! - AES-256-GCM sealed credential records, fresh nonce per write
//! - Lazily created vault key, persisted next to the data as a JWK
//! - Memory, file and SQLite local stores
//! - CSPRNG password generator with character-class policies
//! - Full secure-gate integration for key and plaintext buffers
//!
//! The key is stored in the same place as the ciphertext. Anyone who can
//! read that storage can read the vault.

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod enums;
pub mod generator;
pub mod key_ops;
pub mod model;
pub mod storage;
pub mod vault;

pub mod error;

// Re-export everything users need at the crate root
pub use aliases::{PlainText, VaultKey32};
pub use config::{load as load_config, Config};
pub use crypto::EnvelopeCipher;
pub use error::{CoreError, Result as CoreResult};
pub use generator::{generate, generate_with_rng, PasswordOptions};
pub use key_ops::{KeyMaterial, KeyStore, StoredKeyStore};
pub use model::{DecryptedEntry, EncryptedEnvelope, VaultEntry, VaultEntryData};
pub use storage::{FileStore, LocalStore, MemoryStore, SqliteStore, StoreHandle};
pub use vault::Vault;
