// src/storage/file.rs
//! Directory-backed store: one file per storage key
//!
//! Writes land in a temporary file in the same directory and are then
//! renamed over the target, so a reader never sees a half-written value.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{check_key, LocalStore};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) the store directory
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;

            // Owner-only on Unix: the key file sits next to the data
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&dir, fs::Permissions::from_mode(0o700))?;
            }
        }
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn staged(&self, value: &str) -> Result<NamedTempFile> {
        let mut tmp = tempfile::Builder::new()
            .prefix(".cv-")
            .tempfile_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        Ok(tmp)
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        self.staged(value)?.persist(&path).map_err(|e| e.error)?;
        debug!(key, bytes = value.len(), "file store write");
        Ok(())
    }

    fn set_if_absent(&self, key: &str, value: &str) -> Result<String> {
        let path = self.path_for(key)?;
        match self.staged(value)?.persist_noclobber(&path) {
            Ok(_) => Ok(value.to_owned()),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                debug!(key, "file store value already present");
                Ok(fs::read_to_string(&path)?)
            }
            Err(e) => Err(e.error.into()),
        }
    }

    fn remove(&self, key: &str) -> Result<bool> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("vault")).unwrap();
        store.set("vault_entries", "[]").unwrap();

        let reopened = FileStore::open(dir.path().join("vault")).unwrap();
        assert_eq!(reopened.get("vault_entries").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("missing").unwrap(), None);
    }

    #[test]
    fn set_if_absent_does_not_clobber() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.set_if_absent("key", "one").unwrap(), "one");
        assert_eq!(store.set_if_absent("key", "two").unwrap(), "one");
        assert_eq!(store.get("key").unwrap().as_deref(), Some("one"));
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        store.set_if_absent("a", "3").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json".to_string()]);
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
    }
}
