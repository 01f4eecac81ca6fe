//! In-memory cache storage.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use super::{CacheStorage, StorageError};
use crate::{Request, Response};

/// In-memory cache storage for testing and simulation.
///
/// All state is wrapped in Arc<Mutex<>> to allow Clone and concurrent access.
/// Uses `lock().expect()` which will panic if the mutex is poisoned -
/// acceptable for test code.
#[derive(Clone, Default)]
pub struct MemoryCache {
    inner: Arc<Mutex<BTreeMap<String, BTreeMap<Request, Response>>>>,
}

impl MemoryCache {
    /// Create a new empty `MemoryCache`
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in `cache`. Zero if the cache does not exist.
    #[allow(clippy::expect_used)]
    pub fn entry_count(&self, cache: &str) -> usize {
        self.inner.lock().expect("Mutex poisoned").get(cache).map_or(0, BTreeMap::len)
    }
}

impl CacheStorage for MemoryCache {
    #[allow(clippy::expect_used)]
    fn put_all(&self, cache: &str, entries: &[(Request, Response)]) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        let entries_map = inner.entry(cache.to_string()).or_default();
        for (request, response) in entries {
            entries_map.insert(request.clone(), response.clone());
        }
        Ok(())
    }

    #[allow(clippy::expect_used)]
    fn match_request(&self, cache: &str, request: &Request) -> Result<Option<Response>, StorageError> {
        let inner = self.inner.lock().expect("Mutex poisoned");
        Ok(inner.get(cache).and_then(|entries| entries.get(request)).cloned())
    }

    #[allow(clippy::expect_used)]
    fn cache_names(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.inner.lock().expect("Mutex poisoned").keys().cloned().collect())
    }

    #[allow(clippy::expect_used)]
    fn delete_cache(&self, cache: &str) -> Result<bool, StorageError> {
        Ok(self.inner.lock().expect("Mutex poisoned").remove(cache).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let storage = MemoryCache::new();
        let clone = storage.clone();
        storage.put_all("v1", &[(Request::get("a"), Response::ok("A"))]).unwrap();

        assert_eq!(clone.match_request("v1", &Request::get("./a")).unwrap(), Some(Response::ok("A")));
        assert_eq!(clone.entry_count("v1"), 1);
    }

    #[test]
    fn empty_put_creates_cache() {
        let storage = MemoryCache::new();
        storage.put_all("v1", &[]).unwrap();
        assert_eq!(storage.cache_names().unwrap(), vec!["v1".to_string()]);
    }

    #[test]
    fn match_any_searches_all_caches() {
        let storage = MemoryCache::new();
        storage.put_all("a", &[(Request::get("x"), Response::ok("from a"))]).unwrap();
        storage.put_all("b", &[(Request::get("y"), Response::ok("from b"))]).unwrap();

        assert_eq!(storage.match_any(&Request::get("y")).unwrap(), Some(Response::ok("from b")));
        assert_eq!(storage.match_any(&Request::get("z")).unwrap(), None);
    }

    #[test]
    fn delete_reports_existence() {
        let storage = MemoryCache::new();
        storage.put_all("a", &[]).unwrap();
        assert!(storage.delete_cache("a").unwrap());
        assert!(!storage.delete_cache("a").unwrap());
    }
}
