//! Storage abstraction for cached responses
//!
//! A cache storage holds any number of named caches, each mapping a
//! [`Request`] to its [`Response`]. The trait is synchronous (no async) to
//! keep the storage API simple; the proxy owns all awaiting.

mod error;
mod memory;
mod redb;

pub use error::StorageError;
pub use memory::MemoryCache;

pub use self::redb::RedbCache;
use crate::{Request, Response};

/// Named caches of responses.
///
/// Must be Clone (the proxy and tooling share it), Send + Sync (thread-safe),
/// and synchronous. Implementations share internal state via Arc, so clones
/// access the same underlying storage.
pub trait CacheStorage: Clone + Send + Sync + 'static {
    /// Store every entry into `cache`, creating it if needed.
    ///
    /// # Invariants
    ///
    /// - Post: either all entries are stored or none are
    /// - Post: `cache` exists, even when `entries` is empty
    fn put_all(&self, cache: &str, entries: &[(Request, Response)]) -> Result<(), StorageError>;

    /// Look up `request` in one cache. `None` if the cache or entry is absent.
    fn match_request(&self, cache: &str, request: &Request) -> Result<Option<Response>, StorageError>;

    /// Look up `request` across every cache, in [`Self::cache_names`] order.
    fn match_any(&self, request: &Request) -> Result<Option<Response>, StorageError> {
        for name in self.cache_names()? {
            if let Some(response) = self.match_request(&name, request)? {
                return Ok(Some(response));
            }
        }
        Ok(None)
    }

    /// Names of all existing caches, sorted.
    fn cache_names(&self) -> Result<Vec<String>, StorageError>;

    /// Delete a cache and all its entries. Returns whether it existed.
    fn delete_cache(&self, cache: &str) -> Result<bool, StorageError>;
}
