use serde::{Deserialize, Serialize};

/// Tag written into every record this crate owns in a shared store.
pub const ORIGIN_TAG: &str = "orpets";

/// A cached value with its absolute expiry, stored as JSON under its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default)]
    pub origin: Option<String>,
    pub value: String,
    /// Epoch milliseconds after which the entry is stale.
    pub expiry: i64,
}

impl CacheEntry {
    pub fn new(value: impl Into<String>, expiry: i64) -> Self {
        Self {
            origin: Some(ORIGIN_TAG.to_string()),
            value: value.into(),
            expiry,
        }
    }

    pub fn is_ours(&self) -> bool {
        self.origin.as_deref() == Some(ORIGIN_TAG)
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.expiry
    }
}
