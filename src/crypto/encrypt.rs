// src/crypto/encrypt.rs
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key as AesKey, Nonce};
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::aliases::{PlainText, VaultKey32};
use crate::consts::NONCE_LEN;
use crate::error::{CoreError, Result};

/// Fresh random 96-bit nonce. Drawn on every call, updates included.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| CoreError::KeyUnavailable(format!("secure random source failed: {e}")))?;
    Ok(nonce)
}

/// AES-256-GCM seal with no associated data → (ciphertext ‖ tag, nonce)
pub fn encrypt_to_vec(
    plaintext: &PlainText,
    key: &VaultKey32,
) -> Result<(Vec<u8>, [u8; NONCE_LEN])> {
    let cipher = Aes256Gcm::new(AesKey::<Aes256Gcm>::from_slice(key.expose_secret()));
    let nonce = generate_nonce()?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.expose_secret().as_slice())
        .map_err(|_| CoreError::KeyUnavailable("AES-256-GCM refused to encrypt".into()))?;

    Ok((ciphertext, nonce))
}
