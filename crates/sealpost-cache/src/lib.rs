//! Offline cache proxy for sealpost
//!
//! Makes a fixed, enumerated list of static assets available when the network
//! is unreachable. The proxy installs every asset into a versioned cache,
//! evicts caches of other versions on activation, and intercepts requests
//! network-first, falling back to the cache only when the network itself
//! fails.
//!
//! # Components
//!
//! - [`Manifest`]: cache name prefix, version token and asset list
//! - [`Network`]: trait for the live fetch path
//! - [`storage::CacheStorage`]: named caches of responses, in memory or durable
//! - [`CacheProxy`]: install, activate and fetch interception

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod manifest;
mod network;
mod proxy;
mod request;
pub mod storage;

pub use manifest::{DEFAULT_ASSETS, DEFAULT_CACHE_PREFIX, Manifest, ManifestError, version_token_now};
pub use network::{Network, NetworkError};
pub use proxy::{CacheProxy, ProxyError};
pub use request::{Request, Response};
