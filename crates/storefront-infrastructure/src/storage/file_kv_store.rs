//! File-backed key-value store with atomic writes.
//!
//! Each key is one file `<dir>/<key>.json`. Writes go to a hidden temporary
//! file in the same directory, are fsynced, and are renamed over the target,
//! so a reader sees either the old value or the new one, never a torn write.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use storefront_core::catalog::KeyValueStore;
use storefront_core::error::{Result, StoreError};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Key-value store persisting one file per key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// Keys are limited to ASCII alphanumerics, `.`, `-` and `_` so that they
    /// map to a single file name inside `dir`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !valid {
            return Err(StoreError::internal(format!("Invalid cache key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{key}.json.tmp"))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).await?;

        let tmp_path = self.temp_path(key);
        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(value.as_bytes()).await?;

        // Ensure data is written to disk
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &path).await?;
        tracing::trace!(key, path = %path.display(), "Cache entry written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
