// src/key_ops.rs
//! Vault key generation, export format and persistence
//!
//! The key is exported as a JSON Web Key (`kty: "oct"`, `alg: "A256GCM"`)
//! and kept in the same local store as the entries it protects. Losing the
//! stored JWK makes every existing envelope permanently undecryptable.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aliases::VaultKey32;
use crate::consts::{FINGERPRINT_HEX_LEN, KEY_LEN};
use crate::enums::EncryptionAlgorithm;
use crate::error::{CoreError, Result};
use crate::storage::{check_key, StoreHandle};

pub type Key = VaultKey32;

/// Generate a new random 256-bit vault key from the OS random source
pub fn generate_key() -> Result<Key> {
    let mut bytes = [0u8; KEY_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CoreError::KeyUnavailable(format!("secure random source failed: {e}")))?;
    Ok(Key::new(bytes))
}

/// Short BLAKE3 digest of the key, safe to log
pub fn fingerprint(key: &Key) -> String {
    let mut hex = blake3::hash(key.expose_secret()).to_hex().to_string();
    hex.truncate(FINGERPRINT_HEX_LEN);
    hex
}

/// Storable export of the vault key (RFC 7517 symmetric JWK)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMaterial {
    pub kty: String,
    /// base64url (no padding) key bytes
    pub k: String,
    pub alg: String,
    #[serde(default = "default_ext")]
    pub ext: bool,
    #[serde(default)]
    pub key_ops: Vec<String>,
}

fn default_ext() -> bool {
    true
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("kty", &self.kty)
            .field("k", &"[REDACTED]")
            .field("alg", &self.alg)
            .field("ext", &self.ext)
            .field("key_ops", &self.key_ops)
            .finish()
    }
}

impl KeyMaterial {
    pub fn from_key(key: &Key) -> Self {
        Self {
            kty: "oct".into(),
            k: URL_SAFE_NO_PAD.encode(key.expose_secret()),
            alg: EncryptionAlgorithm::Aes256Gcm.jwk_alg().into(),
            ext: true,
            key_ops: vec!["encrypt".into(), "decrypt".into()],
        }
    }

    /// Rebuild the key; anything other than a 32-byte AES-GCM octet key is refused.
    pub fn to_key(&self) -> Result<Key> {
        if self.kty != "oct" {
            return Err(unavailable(format!("unsupported key type '{}'", self.kty)));
        }
        if self.alg != EncryptionAlgorithm::Aes256Gcm.jwk_alg() {
            return Err(unavailable(format!("unsupported key algorithm '{}'", self.alg)));
        }
        // Exporters differ on padding; accept both
        let decoded = URL_SAFE_NO_PAD
            .decode(self.k.trim_end_matches('='))
            .map_err(|e| unavailable(format!("key material is not base64url: {e}")))?;
        let bytes: [u8; KEY_LEN] = decoded
            .try_into()
            .map_err(|v: Vec<u8>| unavailable(format!("key is {} bytes, expected {KEY_LEN}", v.len())))?;
        Ok(Key::new(bytes))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| unavailable(format!("cannot export key: {e}")))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| unavailable(format!("stored key is not a JWK: {e}")))
    }
}

fn unavailable(reason: String) -> CoreError {
    CoreError::KeyUnavailable(reason)
}

/// Where the encryption core reads and persists its key.
///
/// Implementations must make `store_if_absent` atomic: when two callers race,
/// both get back the single material that ended up stored.
pub trait KeyStore: Send + Sync {
    fn load(&self) -> Result<Option<KeyMaterial>>;

    fn store_if_absent(&self, material: &KeyMaterial) -> Result<KeyMaterial>;
}

/// [`KeyStore`] that keeps the JWK under one fixed key of a [`LocalStore`](crate::storage::LocalStore)
pub struct StoredKeyStore {
    store: StoreHandle,
    storage_key: String,
}

impl StoredKeyStore {
    pub fn new(store: StoreHandle, storage_key: impl Into<String>) -> Result<Self> {
        let storage_key = storage_key.into();
        check_key(&storage_key)?;
        Ok(Self { store, storage_key })
    }
}

impl KeyStore for StoredKeyStore {
    fn load(&self) -> Result<Option<KeyMaterial>> {
        let stored = self
            .store
            .get(&self.storage_key)
            .map_err(|e| unavailable(format!("key storage read failed: {e}")))?;
        debug!(key = %self.storage_key, present = stored.is_some(), "key material lookup");
        stored.as_deref().map(KeyMaterial::from_json).transpose()
    }

    fn store_if_absent(&self, material: &KeyMaterial) -> Result<KeyMaterial> {
        let json = material.to_json()?;
        let winner = self
            .store
            .set_if_absent(&self.storage_key, &json)
            .map_err(|e| unavailable(format!("key storage write failed: {e}")))?;
        KeyMaterial::from_json(&winner)
    }
}
