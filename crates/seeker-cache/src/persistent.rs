//! File-backed lookup cache
//!
//! The store is a flat JSON object mapping resource ids to peer ids:
//!
//! ```json
//! { "r7": "n4", "r13": "n7" }
//! ```
//!
//! Nothing is retained in memory between calls. Every `get` reads the
//! file and every `put` does load-modify-store of the whole mapping, so
//! other processes sharing the path observe updates. The load-modify-store
//! is not atomic: the store is only safe with a single writer.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use seeker_core::{PeerId, ResourceId};
use tracing::{debug, trace};

use crate::LookupCache;
use crate::error::{CacheError, CacheResult};

/// Persisted resource-to-peer mapping
pub type CacheMap = BTreeMap<ResourceId, PeerId>;

/// Lookup cache persisted as a JSON file at a caller-supplied path
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    /// Use the store at `path`; the file need not exist yet
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole persisted mapping
    ///
    /// A missing file reads as an empty mapping.
    pub fn load(&self) -> CacheResult<CacheMap> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = ?self.path, "No lookup cache on disk, treating as empty");
                return Ok(CacheMap::new());
            }
            Err(e) => return Err(CacheError::io(&self.path, e)),
        };

        serde_json::from_str(&text).map_err(|e| CacheError::corrupt(&self.path, e))
    }

    /// Replace the persisted mapping
    fn store(&self, map: &CacheMap) -> CacheResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::io(parent, e))?;
        }

        let text = serde_json::to_string_pretty(map).map_err(|e| CacheError::corrupt(&self.path, e))?;
        std::fs::write(&self.path, text).map_err(|e| CacheError::io(&self.path, e))
    }
}

impl LookupCache for JsonFileCache {
    fn get(&self, resource: &ResourceId) -> CacheResult<Option<PeerId>> {
        Ok(self.load()?.remove(resource))
    }

    fn put(&self, resource: &ResourceId, peer: &PeerId) -> CacheResult<()> {
        let mut map = self.load()?;
        let previous = map.insert(resource.clone(), peer.clone());
        self.store(&map)?;

        debug!(
            path = ?self.path,
            resource = %resource,
            peer = %peer,
            replaced = ?previous,
            "Lookup cache entry written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(s: &str) -> ResourceId {
        ResourceId::from(s)
    }

    fn p(s: &str) -> PeerId {
        PeerId::from(s)
    }

    #[test]
    fn test_missing_store_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonFileCache::new(dir.path().join("cache.json"));

        assert_eq!(cache.get(&r("r1")).unwrap(), None);
        assert!(cache.load().unwrap().is_empty());
    }

    #[test]
    fn test_put_then_get_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        JsonFileCache::new(&path).put(&r("r7"), &p("n4")).unwrap();

        // A fresh handle on the same path sees the entry
        let reopened = JsonFileCache::new(&path);
        assert_eq!(reopened.get(&r("r7")).unwrap(), Some(p("n4")));
    }

    #[test]
    fn test_put_merges_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonFileCache::new(dir.path().join("cache.json"));

        cache.put(&r("r1"), &p("n1")).unwrap();
        cache.put(&r("r2"), &p("n2")).unwrap();
        cache.put(&r("r1"), &p("n9")).unwrap();

        let map = cache.load().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&r("r1")), Some(&p("n9")));
        assert_eq!(map.get(&r("r2")), Some(&p("n2")));
    }

    #[test]
    fn test_external_writer_is_observed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let cache = JsonFileCache::new(&path);

        assert_eq!(cache.get(&r("r5")).unwrap(), None);
        std::fs::write(&path, r#"{"r5": "n3"}"#).unwrap();
        assert_eq!(cache.get(&r("r5")).unwrap(), Some(p("n3")));
    }

    #[test]
    fn test_corrupt_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let cache = JsonFileCache::new(&path);

        assert!(matches!(cache.get(&r("r1")), Err(CacheError::Corrupt { .. })));
        assert!(matches!(cache.put(&r("r1"), &p("n1")), Err(CacheError::Corrupt { .. })));
        // The corrupt file is left untouched
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn test_put_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.json");
        let cache = JsonFileCache::new(&path);

        cache.put(&r("r1"), &p("n1")).unwrap();
        assert!(path.exists());
    }
}
