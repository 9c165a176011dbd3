#![no_main]
use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use orpets::adapters::cache::expiring_store::ExpiringStore;
use orpets::adapters::store::memory_store::MemoryStore;
use orpets::ports::store::StringStore;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let backend = Arc::new(MemoryStore::new());
        let _ = backend.set_item("k", raw);
        let store = ExpiringStore::with_clock(backend, || 0);
        let _ = store.get_with_expiry("k");
        let _ = store.sweep_expired();
    }
});
