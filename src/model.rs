// src/model.rs
//! Record types: plaintext credential, sealed envelope, stored entry

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A plaintext credential record. Only ever persisted inside an
/// [`EncryptedEnvelope`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VaultEntryData {
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
}

impl VaultEntryData {
    /// Build a record, rejecting an empty title. Whitespace is a valid title.
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        url: impl Into<String>,
        notes: impl Into<String>,
    ) -> Result<Self> {
        let data = Self {
            title: title.into(),
            username: username.into(),
            password: password.into(),
            url: url.into(),
            notes: notes.into(),
        };
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(CoreError::InvalidEntry("title must not be empty"));
        }
        Ok(())
    }

    /// Case-insensitive substring match over title, username and url.
    /// Password and notes are never searched.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [&self.title, &self.username, &self.url]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl fmt::Debug for VaultEntryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultEntryData")
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("url", &self.url)
            .field("notes", &"[REDACTED]")
            .finish()
    }
}

/// AES-256-GCM output for one record, both halves base64 (standard alphabet,
/// padded). `encrypted_data` carries the 16-byte tag at its end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedEnvelope {
    pub encrypted_data: String,
    pub iv: String,
}

/// One stored record as it sits in the persisted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultEntry {
    pub id: String,
    #[serde(flatten)]
    pub envelope: EncryptedEnvelope,
    /// Display copy of the title. Stored in the clear when
    /// `features.mirror_titles` is on, empty otherwise.
    #[serde(default)]
    pub title_plaintext: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored entry paired with the outcome of decrypting it.
#[derive(Debug)]
pub struct DecryptedEntry {
    pub entry: VaultEntry,
    pub data: Result<VaultEntryData>,
}

impl DecryptedEntry {
    pub fn id(&self) -> &str {
        &self.entry.id
    }

    pub fn data(&self) -> Option<&VaultEntryData> {
        self.data.as_ref().ok()
    }

    pub fn error(&self) -> Option<&CoreError> {
        self.data.as_ref().err()
    }
}
