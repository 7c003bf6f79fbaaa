// src/config/mod.rs
//! Configuration system for credential-vault
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, load_from, resolve, Config, Features, StorageConfig, StorageKeys};
pub use app::{CONFIG_ENV, DATA_DIR_ENV, STORAGE_BACKEND_ENV};

mod app;
mod defaults;
