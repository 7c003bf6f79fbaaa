// src/config/app.rs
use std::env;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::defaults::*;
use crate::consts::DEFAULT_CONFIG_FILE;
use crate::enums::StorageBackend;
use crate::error::Result;
use crate::generator::PasswordOptions;

/// Path of the TOML config file
pub const CONFIG_ENV: &str = "CV_CONFIG";
/// Overrides `[storage] path`
pub const DATA_DIR_ENV: &str = "CV_DATA_DIR";
/// Overrides `[storage] backend`
pub const STORAGE_BACKEND_ENV: &str = "CV_STORAGE_BACKEND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub storage_keys: StorageKeys,
    pub features: Features,
    /// Options used when the caller does not bring its own
    pub generator: PasswordOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Data directory. The SQLite backend keeps `vault.db` inside it.
    #[serde(default = "default_data_dir")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub key_material: String,
    pub entries: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Keep a cleartext copy of each title next to its ciphertext.
    /// Titles leak to anyone who can read storage while this is on.
    pub mirror_titles: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            storage_keys: default_storage_keys(),
            features: default_features(),
            generator: PasswordOptions::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        default_storage()
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        default_storage_keys()
    }
}

impl Default for Features {
    fn default() -> Self {
        default_features()
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// In-memory storage, defaults everywhere else
    pub fn ephemeral() -> Self {
        let mut conf = Self::default();
        conf.storage.backend = StorageBackend::Memory;
        conf
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            debug!(%dir, "data dir overridden from environment");
            self.storage.path = PathBuf::from(dir);
        }
        if let Ok(backend) = env::var(STORAGE_BACKEND_ENV) {
            self.storage.backend = backend.parse()?;
        }
        Ok(())
    }
}

/// Read a TOML config file without touching the global config
pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Config::from_toml_str(&content)
}

/// Build the effective config from `CV_CONFIG` (or the default file name)
/// plus environment overrides. Missing file → built-in defaults.
pub fn resolve() -> Result<Config> {
    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    let mut conf = if Path::new(&config_path).exists() {
        load_from(&config_path)?
    } else {
        warn!(path = %config_path, "config file not found, using built-in defaults");
        Config::default()
    };

    conf.apply_env_overrides()?;
    Ok(conf)
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Global config, resolved once on first call
pub fn load() -> Result<&'static Config> {
    CONFIG.get_or_try_init(resolve)
}
