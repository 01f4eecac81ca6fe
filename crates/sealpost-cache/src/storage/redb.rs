//! Redb-backed durable cache storage.
//!
//! Uses Redb's ACID transactions with Copy-on-Write for crash safety. A
//! batch of entries is written in a single transaction, so an install either
//! lands completely or not at all.

use std::{path::Path, sync::Arc};

use redb::{Database, ReadableTable, TableDefinition};

use super::{CacheStorage, StorageError};
use crate::{Request, Response};

/// Table: caches
/// Key: cache name as UTF-8 bytes
/// Value: empty (presence marks the cache as existing)
const CACHES: TableDefinition<&[u8], &[u8]> = TableDefinition::new("caches");

/// Table: entries
/// Key: cache name, 0x00, request path
/// Value: CBOR-encoded Response
const ENTRIES: TableDefinition<&[u8], &[u8]> = TableDefinition::new("entries");

/// Durable cache storage backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbCache {
    db: Arc<Database>,
}

impl RedbCache {
    /// Open or create a Redb database at the given path.
    ///
    /// Creates tables if they don't exist (CACHES, ENTRIES).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db = Database::create(path.as_ref()).map_err(|e| StorageError::Io(e.to_string()))?;

        let txn = db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;
        {
            let _ = txn.open_table(CACHES).map_err(|e| StorageError::Io(e.to_string()))?;
            let _ = txn.open_table(ENTRIES).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl CacheStorage for RedbCache {
    fn put_all(&self, cache: &str, entries: &[(Request, Response)]) -> Result<(), StorageError> {
        let txn = self.db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;

        {
            let mut caches = txn.open_table(CACHES).map_err(|e| StorageError::Io(e.to_string()))?;
            caches
                .insert(cache.as_bytes(), b"".as_slice())
                .map_err(|e| StorageError::Io(e.to_string()))?;

            let mut table = txn.open_table(ENTRIES).map_err(|e| StorageError::Io(e.to_string()))?;
            for (request, response) in entries {
                let mut bytes = Vec::with_capacity(16 + response.body.len());
                ciborium::into_writer(response, &mut bytes)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;

                let key = encode_entry_key(cache, request);
                table
                    .insert(key.as_slice(), bytes.as_slice())
                    .map_err(|e| StorageError::Io(e.to_string()))?;
            }
        }

        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(())
    }

    fn match_request(&self, cache: &str, request: &Request) -> Result<Option<Response>, StorageError> {
        let txn = self.db.begin_read().map_err(|e| StorageError::Io(e.to_string()))?;

        let table = txn.open_table(ENTRIES).map_err(|e| StorageError::Io(e.to_string()))?;

        let key = encode_entry_key(cache, request);

        match table.get(key.as_slice()).map_err(|e| StorageError::Io(e.to_string()))? {
            Some(value) => {
                let response: Response = ciborium::from_reader(value.value())
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(response))
            },
            None => Ok(None),
        }
    }

    fn cache_names(&self) -> Result<Vec<String>, StorageError> {
        let txn = self.db.begin_read().map_err(|e| StorageError::Io(e.to_string()))?;

        let table = txn.open_table(CACHES).map_err(|e| StorageError::Io(e.to_string()))?;

        let mut names = Vec::new();

        for result in table.iter().map_err(|e| StorageError::Io(e.to_string()))? {
            let (key, _) = result.map_err(|e| StorageError::Io(e.to_string()))?;
            let name = String::from_utf8(key.value().to_vec())
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            names.push(name);
        }

        Ok(names)
    }

    fn delete_cache(&self, cache: &str) -> Result<bool, StorageError> {
        let txn = self.db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;

        let existed = {
            let mut caches = txn.open_table(CACHES).map_err(|e| StorageError::Io(e.to_string()))?;
            let existed = caches
                .remove(cache.as_bytes())
                .map_err(|e| StorageError::Io(e.to_string()))?
                .is_some();

            let mut table = txn.open_table(ENTRIES).map_err(|e| StorageError::Io(e.to_string()))?;
            let (start, end) = cache_key_range(cache);

            let mut keys = Vec::new();
            for result in table
                .range(start.as_slice()..end.as_slice())
                .map_err(|e| StorageError::Io(e.to_string()))?
            {
                let (key, _) = result.map_err(|e| StorageError::Io(e.to_string()))?;
                keys.push(key.value().to_vec());
            }

            for key in keys {
                table.remove(key.as_slice()).map_err(|e| StorageError::Io(e.to_string()))?;
            }

            existed
        };

        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(existed)
    }
}

/// Encode (cache, request) as an entry key.
///
/// Layout: [cache name][0x00][request path]
/// All entries of one cache are contiguous and sort by path.
fn encode_entry_key(cache: &str, request: &Request) -> Vec<u8> {
    let mut key = Vec::with_capacity(cache.len() + 1 + request.path().len());
    key.extend_from_slice(cache.as_bytes());
    key.push(0x00);
    key.extend_from_slice(request.path().as_bytes());
    key
}

/// Half-open key range covering every entry of `cache`.
fn cache_key_range(cache: &str) -> (Vec<u8>, Vec<u8>) {
    let mut start = cache.as_bytes().to_vec();
    let mut end = start.clone();
    start.push(0x00);
    end.push(0x01);
    (start, end)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_entry_key_layout() {
        let key = encode_entry_key("v1", &Request::get("./index.html"));
        assert_eq!(key, b"v1\x00index.html");

        let (start, end) = cache_key_range("v1");
        assert!(start.as_slice() <= key.as_slice() && key.as_slice() < end.as_slice());

        let other = encode_entry_key("v10", &Request::get("index.html"));
        assert!(!(start.as_slice() <= other.as_slice() && other.as_slice() < end.as_slice()));
    }

    #[test]
    fn test_put_and_match() {
        let dir = tempdir().unwrap();
        let storage = RedbCache::open(dir.path().join("cache.redb")).unwrap();

        storage
            .put_all("v1", &[
                (Request::get("./"), Response::ok("<html>")),
                (Request::get("./public.asc"), Response::ok("KEY")),
            ])
            .unwrap();

        assert_eq!(storage.match_request("v1", &Request::get("/")).unwrap(), Some(Response::ok("<html>")));
        assert_eq!(storage.match_request("v2", &Request::get("/")).unwrap(), None);
        assert_eq!(storage.cache_names().unwrap(), vec!["v1".to_string()]);
    }

    #[test]
    fn test_delete_leaves_prefix_sibling() {
        let dir = tempdir().unwrap();
        let storage = RedbCache::open(dir.path().join("cache.redb")).unwrap();

        storage.put_all("v1", &[(Request::get("a"), Response::ok("1"))]).unwrap();
        storage.put_all("v10", &[(Request::get("a"), Response::ok("10"))]).unwrap();

        assert!(storage.delete_cache("v1").unwrap());
        assert!(!storage.delete_cache("v1").unwrap());

        assert_eq!(storage.match_request("v1", &Request::get("a")).unwrap(), None);
        assert_eq!(storage.match_request("v10", &Request::get("a")).unwrap(), Some(Response::ok("10")));
        assert_eq!(storage.cache_names().unwrap(), vec!["v10".to_string()]);
    }
}
