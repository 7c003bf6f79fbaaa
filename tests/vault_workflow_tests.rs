// tests/vault_workflow_tests.rs
mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::{record, TestVault, ALL_BACKENDS};
use credential_vault::consts::DIGITS;
use credential_vault::enums::StorageBackend;
use credential_vault::error::CoreError;
use credential_vault::{Config, LocalStore, PasswordOptions, Vault, VaultEntry, VaultEntryData};
use serde_json::Value;

#[test]
fn test_create_then_read_returns_same_record() {
    for backend in ALL_BACKENDS {
        let mut t = TestVault::new(backend);
        let data = record("Gmail Account");

        let entry = t.vault.create(&data).unwrap();

        assert!(!entry.id.is_empty());
        assert_eq!(entry.created_at, entry.updated_at);
        assert_eq!(entry.title_plaintext, "Gmail Account");
        assert_eq!(t.vault.read(&entry.id).unwrap(), Some(data), "{backend:?}");
    }
}

#[test]
fn test_update_keeps_id_and_created_at_and_advances_updated_at() {
    for backend in ALL_BACKENDS {
        let mut t = TestVault::new(backend);
        let original = t.vault.create(&record("Bank")).unwrap();

        let mut changed = record("Bank");
        changed.password = "n3w-passw0rd".into();
        changed.notes = "rotated".into();

        let updated = t.vault.update(&original.id, &changed).unwrap().unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
        assert_ne!(updated.envelope.iv, original.envelope.iv);
        assert_eq!(t.vault.read(&original.id).unwrap(), Some(changed));
    }
}

#[test]
fn test_update_refreshes_title_mirror() {
    let mut t = TestVault::new(StorageBackend::Memory);
    let entry = t.vault.create(&record("Old Name")).unwrap();

    let updated = t.vault.update(&entry.id, &record("New Name")).unwrap().unwrap();
    assert_eq!(updated.title_plaintext, "New Name");
}

#[test]
fn test_delete_then_read_is_none() {
    for backend in ALL_BACKENDS {
        let mut t = TestVault::new(backend);
        let keep = t.vault.create(&record("Keep")).unwrap();
        let drop = t.vault.create(&record("Drop")).unwrap();

        assert!(t.vault.delete(&drop.id).unwrap());
        assert_eq!(t.vault.read(&drop.id).unwrap(), None);
        assert!(t.vault.read(&keep.id).unwrap().is_some());
        assert!(!t.vault.delete(&drop.id).unwrap());
    }
}

#[test]
fn test_unknown_id_is_soft_not_found() {
    let mut t = TestVault::new(StorageBackend::Memory);
    t.vault.create(&record("Bank")).unwrap();

    assert_eq!(t.vault.read("no-such-id").unwrap(), None);
    assert_eq!(t.vault.update("no-such-id", &record("X")).unwrap(), None);
    assert!(!t.vault.delete("no-such-id").unwrap());
    assert_eq!(t.vault.entries().unwrap().len(), 1);
}

#[test]
fn test_empty_title_is_rejected_on_create_and_update() {
    let mut t = TestVault::new(StorageBackend::Memory);
    let blank = VaultEntryData {
        title: String::new(),
        ..record("x")
    };

    assert!(matches!(t.vault.create(&blank), Err(CoreError::InvalidEntry(_))));
    let entry = t.vault.create(&record("Bank")).unwrap();
    assert!(matches!(
        t.vault.update(&entry.id, &blank),
        Err(CoreError::InvalidEntry(_))
    ));
    assert!(t.vault.entries().unwrap().len() == 1);
}

#[test]
fn test_whitespace_title_round_trips() {
    for backend in ALL_BACKENDS {
        let mut t = TestVault::new(backend);
        let data = VaultEntryData {
            title: " ".into(),
            ..record("Blank Looking")
        };

        let entry = t.vault.create(&data).unwrap();
        assert_eq!(entry.title_plaintext, " ");
        assert_eq!(t.vault.read(&entry.id).unwrap(), Some(data.clone()), "{backend:?}");

        let renamed = VaultEntryData {
            title: "\t".into(),
            ..data
        };
        assert!(t.vault.update(&entry.id, &renamed).unwrap().is_some());
        assert_eq!(t.vault.read(&entry.id).unwrap().unwrap().title, "\t");
    }
}

#[test]
fn test_list_preserves_insertion_order() {
    let mut t = TestVault::new(StorageBackend::File);
    let titles = ["Zeta", "Alpha", "Mid"];
    for title in titles {
        t.vault.create(&record(title)).unwrap();
    }

    let listed: Vec<String> = t
        .vault
        .list()
        .unwrap()
        .iter()
        .map(|d| d.data().unwrap().title.clone())
        .collect();
    assert_eq!(listed, titles);
}

#[test]
fn test_search_matches_title_username_url_case_insensitively() {
    for backend in ALL_BACKENDS {
        let mut t = TestVault::new(backend);
        let gmail = t.vault.create(&record("Gmail Account")).unwrap();
        t.vault.create(&record("Bank")).unwrap();

        for query in ["gmail", "GMAIL", "GmAiL"] {
            let hits = t.vault.search(query).unwrap();
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].id(), gmail.id);
        }

        // username and url are searched too
        assert_eq!(t.vault.search("bank@example").unwrap().len(), 1);
        assert_eq!(t.vault.search("https://bank").unwrap().len(), 1);
        // password is not
        assert!(t.vault.search("battery").unwrap().is_empty());

        assert_eq!(t.vault.search("").unwrap().len(), 2);
    }
}

#[test]
fn test_entries_survive_reopen() {
    let mut t = TestVault::new(StorageBackend::Sqlite);
    let entry = t.vault.create(&record("Bank")).unwrap();

    let reopened = Vault::open(&t.config).unwrap();
    assert_eq!(reopened.read(&entry.id).unwrap(), Some(record("Bank")));
    assert_eq!(reopened.entries().unwrap(), vec![entry]);
}

#[test]
fn test_persisted_layout_is_two_values() {
    let mut t = TestVault::new(StorageBackend::Memory);
    t.vault.create(&record("Bank")).unwrap();

    let key_json: Value =
        serde_json::from_str(&t.store.get("vault_encryption_key").unwrap().unwrap()).unwrap();
    assert_eq!(key_json["kty"], "oct");
    assert_eq!(key_json["alg"], "A256GCM");

    let list: Value =
        serde_json::from_str(&t.store.get("vault_entries").unwrap().unwrap()).unwrap();
    let stored = &list[0];
    for field in ["id", "encryptedData", "iv", "titlePlaintext", "createdAt", "updatedAt"] {
        assert!(stored.get(field).is_some(), "missing {field}");
    }
    let iv = STANDARD.decode(stored["iv"].as_str().unwrap()).unwrap();
    assert_eq!(iv.len(), 12);

    // The password must never appear in storage
    let raw = t.store.get("vault_entries").unwrap().unwrap();
    assert!(!raw.contains("correct horse"));
}

#[test]
fn test_title_mirroring_can_be_switched_off() {
    let mut config = Config::ephemeral();
    config.features.mirror_titles = false;
    let mut t = TestVault::with_config(StorageBackend::Memory, config);

    let entry = t.vault.create(&record("Secret Project")).unwrap();
    assert_eq!(entry.title_plaintext, "");

    let raw = t.store.get("vault_entries").unwrap().unwrap();
    assert!(!raw.contains("Secret Project"));
    assert_eq!(t.vault.read(&entry.id).unwrap().unwrap().title, "Secret Project");
}

#[test]
fn test_generate_password_uses_configured_options() {
    let mut config = Config::ephemeral();
    config.generator = PasswordOptions {
        length: 24,
        uppercase: false,
        lowercase: false,
        numbers: true,
        symbols: false,
        exclude_lookalikes: false,
    };
    let t = TestVault::with_config(StorageBackend::Memory, config);

    let password = t.vault.generate_password().unwrap();
    assert_eq!(password.chars().count(), 24);
    assert!(password.chars().all(|c| DIGITS.contains(c)));
    // Generating never touches the key or the entry list
    assert!(t.store.get("vault_encryption_key").unwrap().is_none());
}

fn corrupt_entry(t: &TestVault, id: &str) {
    let mut entries: Vec<VaultEntry> =
        serde_json::from_str(&t.store.get("vault_entries").unwrap().unwrap()).unwrap();
    let entry = entries.iter_mut().find(|e| e.id == id).unwrap();
    let mut bytes = STANDARD.decode(&entry.envelope.encrypted_data).unwrap();
    bytes[0] ^= 0x01;
    entry.envelope.encrypted_data = STANDARD.encode(bytes);
    t.store
        .set("vault_entries", &serde_json::to_string(&entries).unwrap())
        .unwrap();
}

#[test]
fn test_one_bad_entry_does_not_spoil_list() {
    let mut t = TestVault::new(StorageBackend::Memory);
    let good = t.vault.create(&record("Good")).unwrap();
    let bad = t.vault.create(&record("Bad")).unwrap();
    corrupt_entry(&t, &bad.id);

    let listed = t.vault.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id(), good.id);
    assert_eq!(listed[0].data().unwrap().title, "Good");
    assert_eq!(listed[1].id(), bad.id);
    assert!(matches!(listed[1].error(), Some(CoreError::Decryption)));

    // Search skips it unless listing everything
    assert_eq!(t.vault.search("").unwrap().len(), 2);
    assert!(t.vault.search("bad").unwrap().is_empty());
    assert_eq!(t.vault.search("good").unwrap().len(), 1);

    assert!(matches!(t.vault.list_strict(), Err(CoreError::Decryption)));
    assert!(matches!(t.vault.read(&bad.id), Err(CoreError::Decryption)));
}

#[test]
fn test_unparsable_entry_list_is_malformed_not_reset() {
    let t = TestVault::new(StorageBackend::Memory);
    t.store.set("vault_entries", "[{oops").unwrap();

    assert!(matches!(t.vault.list(), Err(CoreError::MalformedInput(_))));
    assert_eq!(t.store.get("vault_entries").unwrap().as_deref(), Some("[{oops"));
}

#[test]
fn test_empty_vault_lists_nothing_and_creates_no_key() {
    let t = TestVault::new(StorageBackend::Memory);
    assert!(t.vault.list().unwrap().is_empty());
    assert!(t.vault.search("anything").unwrap().is_empty());
    assert!(t.store.get("vault_encryption_key").unwrap().is_none());
}

#[test]
fn test_two_vaults_on_one_store_lose_updates() {
    // Documented hazard: interleaved read-modify-write across vault values
    let t = TestVault::new(StorageBackend::Memory);
    let mut other = t.sibling();

    let stale = t.vault.entries().unwrap();
    other.create(&record("Written by other")).unwrap();

    // Simulate the first vault finishing a write based on its stale read
    t.store
        .set("vault_entries", &serde_json::to_string(&stale).unwrap())
        .unwrap();

    assert!(t.vault.search("written").unwrap().is_empty());
}
