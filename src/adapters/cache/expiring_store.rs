use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::cache_entry::CacheEntry;
use crate::error::{OrpetsError, Result};
use crate::ports::store::StringStore;

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Per-entry expiry layered over a store that has none of its own.
///
/// Records carry the `orpets` origin tag so that sweeping a shared store
/// never deletes somebody else's keys.
pub struct ExpiringStore {
    backend: Arc<dyn StringStore>,
    clock: Clock,
}

/// Counts from one [`ExpiringStore::sweep_expired`] pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    pub removed: usize,
    pub kept: usize,
    pub foreign: usize,
    /// Expired records the backend refused to delete.
    pub failed: usize,
}

enum Decoded {
    Ours(CacheEntry),
    Foreign,
    Malformed(serde_json::Error),
}

fn decode(raw: &str) -> Decoded {
    match serde_json::from_str::<CacheEntry>(raw) {
        Ok(entry) if entry.is_ours() => Decoded::Ours(entry),
        Ok(_) => Decoded::Foreign,
        // Valid JSON of some other shape belongs to another user of the store.
        Err(e) => match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(_) => Decoded::Foreign,
            Err(_) => Decoded::Malformed(e),
        },
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl ExpiringStore {
    pub fn new(backend: Arc<dyn StringStore>) -> Self {
        Self::with_clock(backend, now_millis)
    }

    pub fn with_clock(
        backend: Arc<dyn StringStore>,
        clock: impl Fn() -> i64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            backend,
            clock: Arc::new(clock),
        }
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }

    pub fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let entry = CacheEntry::new(value, self.now().saturating_add(ttl_ms));
        let json = serde_json::to_string(&entry)?;
        self.backend.set_item(key, &json)
    }

    /// The live value under `key`. A stale record is removed on the way out;
    /// a record owned by someone else reads as absent and is left alone.
    pub fn get_with_expiry(&self, key: &str) -> Result<Option<String>> {
        let Some(raw) = self.backend.get_item(key) else {
            return Ok(None);
        };

        match decode(&raw) {
            Decoded::Ours(entry) => {
                if entry.is_expired(self.now()) {
                    debug!(key, "Cache entry expired");
                    self.backend.remove_item(key)?;
                    return Ok(None);
                }
                Ok(Some(entry.value))
            }
            Decoded::Foreign => Ok(None),
            Decoded::Malformed(e) => Err(OrpetsError::Storage {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Drop every expired `orpets` record. Run once at startup. A record that
    /// cannot be removed is logged and left for the next sweep.
    pub fn sweep_expired(&self) -> SweepStats {
        let now = self.now();
        let mut stats = SweepStats::default();

        for key in self.backend.keys() {
            let Some(raw) = self.backend.get_item(&key) else {
                continue;
            };
            match decode(&raw) {
                Decoded::Ours(entry) if entry.expiry < now => {
                    match self.backend.remove_item(&key) {
                        Ok(()) => stats.removed += 1,
                        Err(e) => {
                            warn!(key, error = %e, "Failed to remove expired cache entry");
                            stats.failed += 1;
                        }
                    }
                }
                Decoded::Ours(_) => stats.kept += 1,
                Decoded::Foreign | Decoded::Malformed(_) => stats.foreign += 1,
            }
        }

        info!(
            removed = stats.removed,
            kept = stats.kept,
            foreign = stats.foreign,
            failed = stats.failed,
            "Swept expired cache entries"
        );
        stats
    }
}
