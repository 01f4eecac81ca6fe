//! Requests and responses as the cache sees them.

use serde::{Deserialize, Serialize};

/// A GET request for a same-origin asset.
///
/// The path is normalized on construction so `./index.html`, `/index.html`
/// and `index.html` all key the same cache entry. The site root is the empty
/// path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Request {
    path: String,
}

impl Request {
    /// GET request for `path`.
    pub fn get(path: &str) -> Self {
        let path = path.strip_prefix("./").unwrap_or(path);
        Self { path: path.trim_start_matches('/').to_string() }
    }

    /// Normalized path, relative to the origin.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A response: HTTP-style status and raw body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Status code.
    pub status: u16,
    /// Body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// 200 response with `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self { status: 200, body: body.into() }
    }

    /// Status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
