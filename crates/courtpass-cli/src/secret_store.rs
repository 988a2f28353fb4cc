//! Keychain-backed secret storage for the token vault.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

use courtpass_core::store::SecretBackend;
use courtpass_core::{Error, Result};
#[cfg(not(test))]
use keyring::Entry;

/// One keychain item per key, grouped under the configured service name.
#[derive(Debug, Clone)]
pub struct KeyringSecretBackend {
    service: String,
}

impl KeyringSecretBackend {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(test)]
    fn test_key(&self, key: &str) -> String {
        format!("{}:{key}", self.service)
    }

    #[cfg(not(test))]
    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service, key).map_err(store_error)
    }
}

fn store_error(error: impl std::fmt::Display) -> Error {
    Error::Store(error.to_string())
}

impl SecretBackend for KeyringSecretBackend {
    #[cfg(not(test))]
    fn read(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(store_error(error)),
        }
    }

    #[cfg(test)]
    fn read(&self, key: &str) -> Result<Option<String>> {
        let guard = Self::test_store().lock().map_err(store_error)?;
        Ok(guard.get(&self.test_key(key)).cloned())
    }

    #[cfg(not(test))]
    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?.set_password(value).map_err(store_error)
    }

    #[cfg(test)]
    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = Self::test_store().lock().map_err(store_error)?;
        guard.insert(self.test_key(key), value.to_string());
        Ok(())
    }

    #[cfg(not(test))]
    fn delete(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(store_error(error)),
        }
    }

    #[cfg(test)]
    fn delete(&self, key: &str) -> Result<()> {
        let mut guard = Self::test_store().lock().map_err(store_error)?;
        guard.remove(&self.test_key(key));
        Ok(())
    }
}
