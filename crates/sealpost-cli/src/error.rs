//! Command-line error type.

use sealpost_cache::{ManifestError, ProxyError, storage::StorageError};
use thiserror::Error;

use crate::ConsoleError;

/// Errors surfaced by `sealpost` subcommands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Local file or stream I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `--origin` is neither an http(s) URL nor an existing directory.
    #[error("invalid origin: {0}")]
    InvalidOrigin(String),

    /// Manifest file could not be loaded.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Install, activate or fetch through the cache failed.
    #[error(transparent)]
    Proxy(#[from] ProxyError),

    /// Cache database could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Console output failed mid-session.
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// The session ended without ciphertext.
    #[error("nothing encrypted: {0}")]
    NotEncrypted(String),
}
