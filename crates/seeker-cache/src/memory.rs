//! In-memory lookup cache
//!
//! Suitable for tests and for runs that do not need the cache to outlive
//! the process.

use dashmap::DashMap;
use seeker_core::{PeerId, ResourceId};
use tracing::debug;

use crate::LookupCache;
use crate::error::CacheResult;
use crate::persistent::CacheMap;

/// In-memory implementation of LookupCache
#[derive(Debug, Default)]
pub struct InMemoryLookupCache {
    entries: DashMap<ResourceId, PeerId>,
}

impl InMemoryLookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache pre-seeded with entries
    pub fn with_entries(entries: impl IntoIterator<Item = (ResourceId, PeerId)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy the current entries into an ordered map
    pub fn snapshot(&self) -> CacheMap {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl LookupCache for InMemoryLookupCache {
    fn get(&self, resource: &ResourceId) -> CacheResult<Option<PeerId>> {
        Ok(self.entries.get(resource).map(|entry| entry.value().clone()))
    }

    fn put(&self, resource: &ResourceId, peer: &PeerId) -> CacheResult<()> {
        self.entries.insert(resource.clone(), peer.clone());
        debug!(resource = %resource, peer = %peer, "Lookup cache entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get() {
        let cache = InMemoryLookupCache::new();
        assert!(cache.is_empty());

        cache.put(&ResourceId::from("r1"), &PeerId::from("n1")).unwrap();
        cache.put(&ResourceId::from("r1"), &PeerId::from("n2")).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(&ResourceId::from("r1")).unwrap(),
            Some(PeerId::from("n2"))
        );
        assert_eq!(cache.get(&ResourceId::from("r2")).unwrap(), None);
    }

    #[test]
    fn test_seeded_snapshot() {
        let cache = InMemoryLookupCache::with_entries([
            (ResourceId::from("r2"), PeerId::from("n2")),
            (ResourceId::from("r1"), PeerId::from("n1")),
        ]);

        let keys: Vec<_> = cache.snapshot().into_keys().collect();
        assert_eq!(keys, vec![ResourceId::from("r1"), ResourceId::from("r2")]);
    }
}
