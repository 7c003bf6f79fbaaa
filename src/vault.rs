// src/vault.rs
//! Vault store: the persisted list of encrypted entries
//!
//! Every operation loads the whole list, changes it in memory and writes the
//! whole list back as one value. Mutations take `&mut self`, so a single
//! `Vault` cannot interleave them. Two `Vault` values over the same store can:
//! if both read before either writes, the later write wins and the other
//! change is lost. Nothing here guards against that.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::crypto::EnvelopeCipher;
use crate::error::{CoreError, Result};
use crate::generator::{generate, PasswordOptions};
use crate::key_ops::{KeyStore, StoredKeyStore};
use crate::model::{DecryptedEntry, VaultEntry, VaultEntryData};
use crate::storage::{check_key, open_store, StoreHandle};

pub struct Vault {
    store: StoreHandle,
    cipher: EnvelopeCipher,
    entries_key: String,
    mirror_titles: bool,
    generator: PasswordOptions,
}

impl Vault {
    /// Open the store named in `config.storage` and build a vault over it
    pub fn open(config: &Config) -> Result<Self> {
        let store = open_store(&config.storage)?;
        Self::with_store(store, config)
    }

    /// Vault over an existing store; the key lives in the same store
    pub fn with_store(store: StoreHandle, config: &Config) -> Result<Self> {
        let key_store = StoredKeyStore::new(store.clone(), config.storage_keys.key_material.as_str())?;
        Self::with_key_store(store, Arc::new(key_store), config)
    }

    /// Vault with a separately supplied key store
    pub fn with_key_store(
        store: StoreHandle,
        key_store: Arc<dyn KeyStore>,
        config: &Config,
    ) -> Result<Self> {
        check_key(&config.storage_keys.entries)?;
        if config.features.mirror_titles {
            debug!("title mirroring on: titles are stored in the clear");
        }
        Ok(Self {
            store,
            cipher: EnvelopeCipher::new(key_store),
            entries_key: config.storage_keys.entries.clone(),
            mirror_titles: config.features.mirror_titles,
            generator: config.generator,
        })
    }

    /// Fresh password drawn with the configured `[generator]` options
    pub fn generate_password(&self) -> Result<String> {
        generate(&self.generator)
    }

    /// Stored entries in insertion order, still encrypted
    pub fn entries(&self) -> Result<Vec<VaultEntry>> {
        match self.store.get(&self.entries_key)? {
            None => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| CoreError::MalformedInput(format!("stored entry list: {e}"))),
        }
    }

    fn save_entries(&self, entries: &[VaultEntry]) -> Result<()> {
        let json = serde_json::to_string(entries).map_err(CoreError::Serialization)?;
        self.store.set(&self.entries_key, &json)?;
        debug!(count = entries.len(), "entry list persisted");
        Ok(())
    }

    fn mirrored_title(&self, data: &VaultEntryData) -> String {
        if self.mirror_titles {
            data.title.clone()
        } else {
            String::new()
        }
    }

    pub fn create(&mut self, data: &VaultEntryData) -> Result<VaultEntry> {
        data.validate()?;
        let envelope = self.cipher.encrypt(data)?;
        let now = Utc::now();

        let entry = VaultEntry {
            id: Uuid::new_v4().to_string(),
            envelope,
            title_plaintext: self.mirrored_title(data),
            created_at: now,
            updated_at: now,
        };

        let mut entries = self.entries()?;
        entries.push(entry.clone());
        self.save_entries(&entries)?;

        debug!(id = %entry.id, "entry created");
        Ok(entry)
    }

    /// Decrypted record for `id`, or `None` if no such entry
    pub fn read(&self, id: &str) -> Result<Option<VaultEntryData>> {
        let entries = self.entries()?;
        let Some(entry) = entries.iter().find(|e| e.id == id) else {
            return Ok(None);
        };
        self.cipher.decrypt(&entry.envelope).map(Some)
    }

    /// Every entry with its decryption outcome, in stored order.
    ///
    /// A bad envelope only marks its own entry; key or storage failures
    /// abort the whole call.
    pub fn list(&self) -> Result<Vec<DecryptedEntry>> {
        self.entries()?
            .into_iter()
            .map(|entry| {
                let data = match self.cipher.decrypt(&entry.envelope) {
                    Err(e) if !e.is_per_entry() => return Err(e),
                    Err(e) => {
                        warn!(id = %entry.id, error = %e, "entry could not be decrypted");
                        Err(e)
                    }
                    Ok(data) => Ok(data),
                };
                Ok(DecryptedEntry { entry, data })
            })
            .collect()
    }

    /// Like [`list`](Self::list) but fails on the first undecryptable entry
    pub fn list_strict(&self) -> Result<Vec<(VaultEntry, VaultEntryData)>> {
        self.entries()?
            .into_iter()
            .map(|entry| {
                let data = self.cipher.decrypt(&entry.envelope)?;
                Ok((entry, data))
            })
            .collect()
    }

    /// Re-encrypt `id` under a fresh nonce. `id` and `created_at` never change.
    pub fn update(&mut self, id: &str, data: &VaultEntryData) -> Result<Option<VaultEntry>> {
        data.validate()?;
        let mut entries = self.entries()?;
        let Some(index) = entries.iter().position(|e| e.id == id) else {
            return Ok(None);
        };

        let envelope = self.cipher.encrypt(data)?;
        let title_plaintext = self.mirrored_title(data);
        let entry = &mut entries[index];
        entry.envelope = envelope;
        entry.title_plaintext = title_plaintext;
        entry.updated_at = next_timestamp(entry.updated_at);
        let updated = entry.clone();

        self.save_entries(&entries)?;
        debug!(id, "entry updated");
        Ok(Some(updated))
    }

    /// Returns whether an entry was removed
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() == before {
            return Ok(false);
        }

        self.save_entries(&entries)?;
        debug!(id, "entry deleted");
        Ok(true)
    }

    /// Entries whose title, username or url contains `query`, ignoring case.
    /// An empty query returns everything, undecryptable entries included;
    /// otherwise undecryptable entries never match.
    pub fn search(&self, query: &str) -> Result<Vec<DecryptedEntry>> {
        let all = self.list()?;
        if query.is_empty() {
            return Ok(all);
        }
        Ok(all
            .into_iter()
            .filter(|d| d.data().is_some_and(|data| data.matches(query)))
            .collect())
    }
}

/// `now`, or just after `previous` if the clock has not moved past it
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
