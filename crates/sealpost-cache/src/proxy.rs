//! Offline cache proxy.
//!
//! [`CacheProxy`] implements the three lifecycle hooks of an offline cache:
//!
//! - **install** pre-caches every manifest asset, all-or-nothing
//! - **activate** evicts every cache that is not the current version
//! - **fetch** goes to the network first and falls back to the cache only
//!   when the network itself fails, never on an HTTP error status
//!
//! There is no per-entry expiry and no size bound: version eviction on
//! activation is the only way entries leave the cache.

use futures::future::try_join_all;
use thiserror::Error;

use crate::{
    Manifest, Network, NetworkError, Request, Response,
    storage::{CacheStorage, StorageError},
};

/// Proxy failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// An asset could not be fetched during install.
    #[error("failed to fetch {path}: {source}")]
    Network {
        /// Asset path.
        path: String,
        /// Underlying failure.
        source: NetworkError,
    },

    /// An asset answered with a non-success status during install.
    #[error("failed to fetch {path}: HTTP {status}")]
    Status {
        /// Asset path.
        path: String,
        /// Status received.
        status: u16,
    },

    /// Storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Network failed and no cache holds the request.
    #[error("offline and {path} is not cached: {source}")]
    Offline {
        /// Requested path.
        path: String,
        /// Network failure that triggered the fallback.
        source: NetworkError,
    },
}

/// Network-first proxy with a versioned offline cache.
pub struct CacheProxy<N: Network, S: CacheStorage> {
    network: N,
    storage: S,
    manifest: Manifest,
}

impl<N: Network, S: CacheStorage> CacheProxy<N, S> {
    /// Create a proxy for `manifest`.
    pub fn new(network: N, storage: S, manifest: Manifest) -> Self {
        Self { network, storage, manifest }
    }

    /// Name of the current cache.
    pub fn cache_name(&self) -> String {
        self.manifest.cache_name()
    }

    /// Manifest this proxy installs.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Underlying network.
    pub fn network(&self) -> &N {
        &self.network
    }

    /// Fetch every manifest asset concurrently and store them in the current
    /// cache. Returns the number of entries stored.
    ///
    /// # Errors
    ///
    /// Fails on the first network error or non-success status; nothing is
    /// stored in that case.
    pub async fn install(&self) -> Result<usize, ProxyError> {
        let requests = self.manifest.requests();

        let entries = try_join_all(requests.into_iter().map(|request| async move {
            let response = self.network.fetch(&request).await.map_err(|source| ProxyError::Network {
                path: request.path().to_string(),
                source,
            })?;

            if !response.is_success() {
                return Err(ProxyError::Status {
                    path: request.path().to_string(),
                    status: response.status,
                });
            }
            Ok((request, response))
        }))
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "install failed, nothing cached"))?;

        let cache = self.cache_name();
        self.storage.put_all(&cache, &entries)?;

        tracing::info!(%cache, entries = entries.len(), "installed");
        Ok(entries.len())
    }

    /// Delete every cache other than the current one. Returns the deleted
    /// names.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn activate(&self) -> Result<Vec<String>, ProxyError> {
        let current = self.cache_name();
        let mut deleted = Vec::new();

        for name in self.storage.cache_names()? {
            if name != current && self.storage.delete_cache(&name)? {
                tracing::info!(cache = %name, "deleted stale cache");
                deleted.push(name);
            }
        }

        Ok(deleted)
    }

    /// Intercept a request: network first, cache on network failure.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Offline`] when the network fails and no cache
    /// holds the request. No offline page is synthesized.
    pub async fn fetch(&self, request: &Request) -> Result<Response, ProxyError> {
        match self.network.fetch(request).await {
            Ok(response) => Ok(response),
            Err(source) => {
                tracing::debug!(path = request.path(), error = %source, "network failed, trying cache");
                match self.storage.match_any(request)? {
                    Some(response) => Ok(response),
                    None => Err(ProxyError::Offline { path: request.path().to_string(), source }),
                }
            },
        }
    }
}
