// src/error.rs
//! Public error type for the entire crate
//!
//! "Not found" is deliberately absent: `read`/`update` answer with `None`
//! and `delete` with `false`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Authentication tag did not verify: tampered ciphertext, tampered
    /// nonce, or a different key than the one that sealed the envelope.
    #[error("Decryption failed: ciphertext or nonce rejected by AES-256-GCM")]
    Decryption,

    /// Stored text could not be decoded before the cipher ran
    /// (bad base64, wrong nonce length, unparsable entry list).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The cipher accepted the envelope but the plaintext is not a record
    #[error("Record is not valid JSON: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// A record or the entry list could not be encoded for storage
    #[error("Could not encode for storage: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Secure random source or key storage is unusable.
    #[error("Encryption key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(&'static str),

    #[error("Invalid password options: {0}")]
    InvalidOptions(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// True for failures that concern one envelope only, which listing
    /// callers may skip instead of aborting.
    pub fn is_per_entry(&self) -> bool {
        matches!(
            self,
            CoreError::Decryption | CoreError::MalformedInput(_) | CoreError::Deserialization(_)
        )
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
