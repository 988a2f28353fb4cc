//! In-process secret backend for tests and mock mode.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::SecretBackend;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct MemorySecretBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySecretBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored entry.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> Result<T> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|error| Error::Store(error.to_string()))?;
        Ok(f(&mut guard))
    }
}

impl SecretBackend for MemorySecretBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}
