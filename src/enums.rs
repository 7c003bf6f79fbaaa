// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the user-visible choices: storage backend and
//! record encryption algorithm.

use serde::{Deserialize, Serialize};

/// Where the key material and the entry list are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum StorageBackend {
    /// Process memory only; everything is gone on drop
    Memory,
    /// One file per storage key inside a directory
    #[default]
    File,
    /// A single SQLite database with a key/value table
    Sqlite,
}

impl std::str::FromStr for StorageBackend {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "file" | "files" | "fs" => Ok(StorageBackend::File),
            "sqlite" | "db" => Ok(StorageBackend::Sqlite),
            other => Err(crate::error::CoreError::Config(format!(
                "unknown storage backend '{other}'"
            ))),
        }
    }
}

/// Supported record encryption algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum EncryptionAlgorithm {
    #[default]
    Aes256Gcm,
}

impl EncryptionAlgorithm {
    /// JOSE algorithm identifier written into exported key material
    pub const fn jwk_alg(self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes256Gcm => crate::consts::JWK_ALG_A256GCM,
        }
    }
}
