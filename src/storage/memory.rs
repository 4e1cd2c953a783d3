use dashmap::DashMap;

use crate::error::AppError;
use crate::storage::{Storage, StorageKey};

/// Process-local storage, used by tests and for throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<StorageKey, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: StorageKey) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(&key).map(|entry| entry.value().clone()))
    }

    fn save(&self, key: StorageKey, value: &str) -> Result<(), AppError> {
        self.entries.insert(key, value.to_string());
        Ok(())
    }

    fn clear(&self, key: StorageKey) -> Result<(), AppError> {
        self.entries.remove(&key);
        Ok(())
    }
}
