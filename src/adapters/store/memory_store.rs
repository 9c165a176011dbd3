use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::ports::store::StringStore;

/// Volatile store; the contents die with the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map_or(0, |map| map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StringStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let map = self.inner.read().map_or_else(
            |_| {
                tracing::error!("Store lock poisoned on get('{key}'), returning miss");
                None
            },
            Some,
        )?;
        map.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), value.to_string());
        } else {
            tracing::error!("Store lock poisoned on set('{key}'), skipping write");
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if let Ok(mut map) = self.inner.write() {
            map.remove(key);
        } else {
            tracing::error!("Store lock poisoned on remove('{key}'), skipping");
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }
}
