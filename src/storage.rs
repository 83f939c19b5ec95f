//! Local key/value persistence
//!
//! Mirrors the browser's LocalStorage: string keys, string values, per-origin.
//! Reads are forgiving (missing or corrupt data falls back to defaults),
//! writes report failures to the caller.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A string key/value store shared by the framework's persistent pieces
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store for native runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage` backed store
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Open the page's LocalStorage (fails in private modes that disable it)
    pub fn open() -> Result<Self> {
        let window = web_sys::window().context("no window")?;
        let storage = window
            .local_storage()
            .map_err(|e| anyhow::anyhow!("localStorage unavailable: {:?}", e))?
            .context("localStorage disabled")?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| anyhow::anyhow!("get_item({key}) failed: {:?}", e))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| anyhow::anyhow!("set_item({key}) failed: {:?}", e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| anyhow::anyhow!("remove_item({key}) failed: {:?}", e))
    }
}

/// Load a JSON value, treating missing, unreadable and corrupt entries alike
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = match store.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read '{}': {:#}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding corrupt '{}': {}", key, e);
            None
        }
    }
}

/// Serialize a value as JSON under `key`
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value).with_context(|| format!("serializing '{key}'"))?;
    store.set(key, &json)
}

/// Store whose every call fails, like LocalStorage over quota or revoked
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        anyhow::bail!("get_item({key}) failed: SecurityError")
    }

    fn set(&self, key: &str, _value: &str) -> Result<()> {
        anyhow::bail!("set_item({key}) failed: QuotaExceededError")
    }

    fn remove(&self, key: &str) -> Result<()> {
        anyhow::bail!("remove_item({key}) failed: SecurityError")
    }
}
