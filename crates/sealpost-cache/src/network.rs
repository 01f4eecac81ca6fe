//! Live network path.

use std::future::Future;

use thiserror::Error;

use crate::{Request, Response};

/// Network-level failures.
///
/// An HTTP error status is not a network failure: it is a successful
/// [`Response`] with that status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Host unreachable, connection refused, or the client is offline.
    #[error("network unreachable: {0}")]
    Unreachable(String),

    /// The request could not be formed against the origin.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Fetches requests from the origin.
pub trait Network: Send + Sync {
    /// Fetch `request` from the network.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received at all.
    fn fetch(&self, request: &Request) -> impl Future<Output = Result<Response, NetworkError>> + Send;
}
