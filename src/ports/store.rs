use crate::error::Result;

/// Flat, persistent key -> string mapping shared with other users of the
/// same storage. Values are opaque strings; encoding is the caller's job.
pub trait StringStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    /// Snapshot of every key currently present.
    fn keys(&self) -> Vec<String>;
}
