// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{Features, StorageConfig, StorageKeys};
use crate::consts::{DEFAULT_DATA_DIR_NAME, DEFAULT_ENTRIES_KEY, DEFAULT_KEY_MATERIAL_KEY};
use crate::enums::StorageBackend;

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DATA_DIR_NAME)
}

pub fn default_storage() -> StorageConfig {
    StorageConfig {
        backend: StorageBackend::default(),
        path: default_data_dir(),
    }
}

pub fn default_storage_keys() -> StorageKeys {
    StorageKeys {
        key_material: DEFAULT_KEY_MATERIAL_KEY.into(),
        entries: DEFAULT_ENTRIES_KEY.into(),
    }
}

pub fn default_features() -> Features {
    Features {
        mirror_titles: true,
    }
}
