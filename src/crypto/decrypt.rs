// src/crypto/decrypt.rs
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key as AesKey, Nonce};

use crate::aliases::{PlainText, VaultKey32};
use crate::consts::NONCE_LEN;
use crate::error::{CoreError, Result};

/// AES-256-GCM open. Any tag mismatch is [`CoreError::Decryption`];
/// no plaintext escapes before verification.
pub fn decrypt_to_vec(
    ciphertext: &[u8],
    nonce: &[u8; NONCE_LEN],
    key: &VaultKey32,
) -> Result<PlainText> {
    let cipher = Aes256Gcm::new(AesKey::<Aes256Gcm>::from_slice(key.expose_secret()));

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CoreError::Decryption)?;

    Ok(PlainText::new(plaintext))
}
