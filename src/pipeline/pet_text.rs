use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::adapters::cache::expiring_store::ExpiringStore;
use crate::error::Result;
use crate::ports::pet_source::PetTextSource;

/// Pet-text entries live for two days.
pub const PET_TEXT_TTL: Duration = Duration::from_secs(48 * 60 * 60);

/// Cache-first lookup of a listing's pet policy.
pub struct PetTextService {
    store: ExpiringStore,
    source: Arc<dyn PetTextSource>,
    ttl: Duration,
}

impl PetTextService {
    pub fn new(store: ExpiringStore, source: Arc<dyn PetTextSource>) -> Self {
        Self::with_ttl(store, source, PET_TEXT_TTL)
    }

    pub fn with_ttl(store: ExpiringStore, source: Arc<dyn PetTextSource>, ttl: Duration) -> Self {
        Self { store, source, ttl }
    }

    pub fn store(&self) -> &ExpiringStore {
        &self.store
    }

    /// Cached text if still live, otherwise scrape and cache it. Failures are
    /// never cached.
    pub async fn get_pet_text(&self, url: &str) -> Result<String> {
        match self.store.get_with_expiry(url) {
            Ok(Some(text)) => {
                debug!(url, "Cache hit for pet text");
                return Ok(text);
            }
            Ok(None) => {}
            Err(e) => warn!(url, error = %e, "Unreadable cache record, refetching"),
        }

        let text = self.source.scrape_pet_text(url).await?;

        if let Err(e) = self.store.set_with_expiry(url, &text, self.ttl) {
            warn!(url, error = %e, "Failed to cache pet text");
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::memory_store::MemoryStore;
    use crate::error::OrpetsError;
    use crate::ports::store::StringStore;
    use crate::test_helpers::MockPetSource;

    const NOW: i64 = 1_700_000_000_000;

    fn service(source: Arc<MockPetSource>) -> (Arc<MemoryStore>, PetTextService) {
        let backend = Arc::new(MemoryStore::new());
        let store = ExpiringStore::with_clock(backend.clone(), || NOW);
        (backend, PetTextService::new(store, source))
    }

    #[tokio::test]
    async fn second_call_is_cache_hit() {
        let source = Arc::new(MockPetSource::returning("<li>Dogs OK</li>"));
        let (_, svc) = service(source.clone());

        let first = svc.get_pet_text("https://example.com/hotel/42").await.unwrap();
        let second = svc.get_pet_text("https://example.com/hotel/42").await.unwrap();

        assert_eq!(first, "<li>Dogs OK</li>");
        assert_eq!(second, first);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn miss_writes_entry_with_two_day_expiry() {
        let source = Arc::new(MockPetSource::returning("<li>Cats</li>"));
        let (backend, svc) = service(source);

        svc.get_pet_text("u").await.unwrap();

        let raw = backend.get_item("u").unwrap();
        let entry: crate::domain::cache_entry::CacheEntry = serde_json::from_str(&raw).unwrap();
        assert_eq!(entry.value, "<li>Cats</li>");
        assert_eq!(entry.expiry, NOW + 48 * 60 * 60 * 1000);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let source = Arc::new(MockPetSource::failing_with(|url| OrpetsError::Network {
            url: url.to_string(),
            status: 500,
        }));
        let (backend, svc) = service(source.clone());

        assert!(svc.get_pet_text("u").await.is_err());
        assert!(svc.get_pet_text("u").await.is_err());

        assert!(backend.get_item("u").is_none());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn malformed_record_is_refetched_and_overwritten() {
        let source = Arc::new(MockPetSource::returning("<li>Fresh</li>"));
        let (backend, svc) = service(source.clone());
        backend.set_item("u", "{broken").unwrap();

        assert_eq!(svc.get_pet_text("u").await.unwrap(), "<li>Fresh</li>");
        assert_eq!(source.calls(), 1);
        assert!(backend.get_item("u").unwrap().contains("orpets"));
    }
}
