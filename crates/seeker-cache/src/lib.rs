//! # Seeker Cache
//!
//! Resource lookup cache for the seeker overlay.
//!
//! The cache remembers, for each resource, the last peer a search found
//! it at. Informed search strategies consult it before traversing the
//! topology. Entries never expire; a later successful search overwrites
//! the earlier entry.
//!
//! ## Features
//!
//! - **LookupCache trait**: `get`/`put` repository interface
//! - **JsonFileCache**: persisted JSON mapping, re-read on every call
//! - **InMemoryLookupCache**: DashMap-backed implementation for tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use seeker_cache::{JsonFileCache, LookupCache};
//!
//! let cache = JsonFileCache::new("lookup_cache.json");
//! cache.put(&"r7".into(), &"n4".into())?;
//! assert_eq!(cache.get(&"r7".into())?, Some("n4".into()));
//! ```

pub mod error;
pub mod memory;
pub mod persistent;

pub use error::{CacheError, CacheResult};
pub use memory::InMemoryLookupCache;
pub use persistent::{CacheMap, JsonFileCache};

use std::sync::Arc;

use seeker_core::{PeerId, ResourceId};

/// Repository interface for the resource lookup cache
///
/// Implementations are single-writer: concurrent `put`s against the same
/// backing store may lose updates.
pub trait LookupCache {
    /// Last peer known to hold `resource`, if any
    fn get(&self, resource: &ResourceId) -> CacheResult<Option<PeerId>>;

    /// Record `peer` as the holder of `resource`, replacing any earlier entry
    fn put(&self, resource: &ResourceId, peer: &PeerId) -> CacheResult<()>;
}

impl<C: LookupCache + ?Sized> LookupCache for &C {
    fn get(&self, resource: &ResourceId) -> CacheResult<Option<PeerId>> {
        (**self).get(resource)
    }

    fn put(&self, resource: &ResourceId, peer: &PeerId) -> CacheResult<()> {
        (**self).put(resource, peer)
    }
}

impl<C: LookupCache + ?Sized> LookupCache for Arc<C> {
    fn get(&self, resource: &ResourceId) -> CacheResult<Option<PeerId>> {
        (**self).get(resource)
    }

    fn put(&self, resource: &ResourceId, peer: &PeerId) -> CacheResult<()> {
        (**self).put(resource, peer)
    }
}

impl<C: LookupCache + ?Sized> LookupCache for Box<C> {
    fn get(&self, resource: &ResourceId) -> CacheResult<Option<PeerId>> {
        (**self).get(resource)
    }

    fn put(&self, resource: &ResourceId, peer: &PeerId) -> CacheResult<()> {
        (**self).put(resource, peer)
    }
}
