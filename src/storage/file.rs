use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;
use crate::storage::{Storage, StorageKey};

/// One `<key>.json` file per key inside a data directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written blob.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| {
            AppError::Storage(format!("failed to create {}: {err}", root.display()))
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: StorageKey) -> Result<Option<String>, AppError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::Storage(format!(
                "failed to read {}: {err}",
                path.display()
            ))),
        }
    }

    fn save(&self, key: StorageKey, value: &str) -> Result<(), AppError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|err| {
            AppError::Storage(format!("failed to write {}: {err}", tmp.display()))
        })?;
        fs::rename(&tmp, &path).map_err(|err| {
            AppError::Storage(format!("failed to replace {}: {err}", path.display()))
        })?;

        debug!(key = %key, bytes = value.len(), "storage key written");
        Ok(())
    }

    fn clear(&self, key: StorageKey) -> Result<(), AppError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::Storage(format!(
                "failed to remove {}: {err}",
                path.display()
            ))),
        }
    }
}
