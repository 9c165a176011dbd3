use std::collections::HashSet;

/// Listings already claimed during this page session, by index.
#[derive(Debug, Default)]
pub struct ProcessedSet {
    seen: HashSet<usize>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `index`. Returns `false` if it was already claimed.
    pub fn mark(&mut self, index: usize) -> bool {
        self.seen.insert(index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.seen.contains(&index)
    }

    pub fn release(&mut self, index: usize) {
        self.seen.remove(&index);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_is_idempotent() {
        let mut set = ProcessedSet::new();
        assert!(set.mark(3));
        assert!(!set.mark(3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn release_allows_reclaim() {
        let mut set = ProcessedSet::new();
        set.mark(1);
        set.release(1);
        assert!(!set.contains(1));
        assert!(set.mark(1));
    }
}
