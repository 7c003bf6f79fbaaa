// src/crypto/mod.rs
//! Record encryption core
//!
//! `EnvelopeCipher` owns the vault key for its lifetime and turns one
//! [`VaultEntryData`] into one [`EncryptedEnvelope`] and back. It never
//! holds record state.
//!
//! Wire form: the record is serialized as UTF-8 JSON, sealed with
//! AES-256-GCM under a fresh 12-byte nonce, and both the ciphertext (tag
//! appended) and the nonce are base64-encoded independently.

mod decrypt;
mod encrypt;

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::OnceCell;
use tracing::{debug, info};

pub use decrypt::decrypt_to_vec;
pub use encrypt::{encrypt_to_vec, generate_nonce};

use crate::aliases::PlainText;
use crate::consts::NONCE_LEN;
use crate::error::{CoreError, Result};
use crate::key_ops::{fingerprint, generate_key, Key, KeyMaterial, KeyStore};
use crate::model::{EncryptedEnvelope, VaultEntryData};

pub struct EnvelopeCipher {
    key_store: Arc<dyn KeyStore>,
    key: OnceCell<Key>,
}

impl EnvelopeCipher {
    pub fn new(key_store: Arc<dyn KeyStore>) -> Self {
        Self {
            key_store,
            key: OnceCell::new(),
        }
    }

    /// Load the persisted key, creating and persisting one on first use.
    ///
    /// Initialization runs at most once per cipher; concurrent callers block
    /// until it finishes. Across ciphers sharing a store, the key store's
    /// insert-if-absent picks a single winner and the loser adopts it.
    pub fn get_or_create_key(&self) -> Result<&Key> {
        self.key.get_or_try_init(|| self.load_or_create())
    }

    fn load_or_create(&self) -> Result<Key> {
        if let Some(material) = self.key_store.load()? {
            let key = material.to_key()?;
            debug!(fingerprint = %fingerprint(&key), "loaded vault key");
            return Ok(key);
        }

        let fresh = generate_key()?;
        let stored = self
            .key_store
            .store_if_absent(&KeyMaterial::from_key(&fresh))?
            .to_key()?;

        if stored.expose_secret() == fresh.expose_secret() {
            info!(fingerprint = %fingerprint(&stored), "generated new vault key");
        } else {
            info!(fingerprint = %fingerprint(&stored), "adopted vault key created concurrently");
        }
        Ok(stored)
    }

    /// Fingerprint of the active key (creates the key if none exists yet)
    pub fn key_fingerprint(&self) -> Result<String> {
        Ok(fingerprint(self.get_or_create_key()?))
    }

    pub fn encrypt(&self, record: &VaultEntryData) -> Result<EncryptedEnvelope> {
        let key = self.get_or_create_key()?;
        let plaintext =
            PlainText::new(serde_json::to_vec(record).map_err(CoreError::Serialization)?);

        let (ciphertext, nonce) = encrypt_to_vec(&plaintext, key)?;

        Ok(EncryptedEnvelope {
            encrypted_data: STANDARD.encode(ciphertext),
            iv: STANDARD.encode(nonce),
        })
    }

    pub fn decrypt(&self, envelope: &EncryptedEnvelope) -> Result<VaultEntryData> {
        let (ciphertext, nonce) = decode_envelope(envelope)?;
        let key = self.get_or_create_key()?;

        let plaintext = decrypt_to_vec(&ciphertext, &nonce, key)?;
        serde_json::from_slice(plaintext.expose_secret()).map_err(CoreError::Deserialization)
    }
}

/// Base64-decode both halves and check the nonce length
pub fn decode_envelope(envelope: &EncryptedEnvelope) -> Result<(Vec<u8>, [u8; NONCE_LEN])> {
    let ciphertext = STANDARD
        .decode(&envelope.encrypted_data)
        .map_err(|e| CoreError::MalformedInput(format!("encryptedData is not base64: {e}")))?;
    let iv = STANDARD
        .decode(&envelope.iv)
        .map_err(|e| CoreError::MalformedInput(format!("iv is not base64: {e}")))?;
    let nonce: [u8; NONCE_LEN] = iv.try_into().map_err(|v: Vec<u8>| {
        CoreError::MalformedInput(format!("iv is {} bytes, expected {NONCE_LEN}", v.len()))
    })?;
    Ok((ciphertext, nonce))
}
