use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{OrpetsError, Result};
use crate::ports::store::StringStore;

/// Store persisted as a single JSON object file.
///
/// The whole map is loaded on open and written back on every mutation, the
/// way a browser's `localStorage` survives reloads.
pub struct FileStore {
    path: PathBuf,
    inner: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let map: BTreeMap<String, String> = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    OrpetsError::Config(format!(
                        "store file {} is not a JSON object: {e}",
                        path.display()
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = map.len(), "Opened store file");
        Ok(Self {
            path,
            inner: RwLock::new(map),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply `op` to a copy of the map and adopt it only once it is on disk,
    /// so a failed write leaves memory and file in agreement.
    fn mutate(&self, key: &str, op: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut map = self.inner.write().map_err(|_| OrpetsError::Storage {
            key: key.to_string(),
            reason: format!("store lock poisoned: {}", self.path.display()),
        })?;
        let mut next = map.clone();
        op(&mut next);
        self.persist(&next)?;
        *map = next;
        Ok(())
    }
}

impl StringStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(key, |map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.mutate(key, |map| {
            map.remove(key);
        })
    }

    fn keys(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }
}
