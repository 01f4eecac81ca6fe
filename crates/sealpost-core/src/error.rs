//! Error types for the sealpost core.
//!
//! Errors are grouped by the boundary they cross: the OpenPGP capability, the
//! integrity check, key acquisition, and the platform services a driver
//! provides (fetch, file read, clipboard). All of them are recoverable except
//! [`CapabilityError::Unavailable`], which blocks the whole page.
//!
//! Every type is `Clone + PartialEq` so errors can travel inside workflow
//! events and be asserted on in tests.

use thiserror::Error;

/// Errors reported by a [`crate::PgpCapability`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The OpenPGP implementation is not loaded at all.
    #[error("OpenPGP capability unavailable: {0}")]
    Unavailable(String),

    /// Armored key text could not be parsed.
    #[error("{0}")]
    InvalidKey(String),

    /// The key carries no component that can encrypt.
    #[error("key has no encryption-capable component")]
    NoEncryptionKey,

    /// Encryption or armoring failed.
    #[error("{0}")]
    Encrypt(String),
}

/// Pinned digest did not match the fetched content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// SHA-256 of the content differs from the pinned value.
    #[error("integrity mismatch: expected {expected}, got {actual}")]
    Mismatch {
        /// Pinned base64 digest.
        expected: String,
        /// Digest computed over the fetched content.
        actual: String,
    },
}

/// Reasons a key load was rejected after the text was obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyLoadError {
    /// Integrity check failed; the key was never parsed.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// The capability refused the key text.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

impl From<CapabilityError> for KeyLoadError {
    fn from(err: CapabilityError) -> Self {
        Self::InvalidKey(err.to_string())
    }
}

/// The well-known key resource could not be fetched at all.
///
/// HTTP error statuses are not errors at this layer; they arrive as a
/// resource with a non-success status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No origin configured to fetch from.
    #[error("no origin configured")]
    NoOrigin,

    /// Network-level failure (DNS, connection refused, offline).
    #[error("network error: {0}")]
    Network(String),
}

/// A user-selected file could not be read as text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    /// Underlying read failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Content is not valid UTF-8.
    #[error("file is not valid UTF-8 text")]
    NotText,
}

impl From<std::io::Error> for FileError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::InvalidData { Self::NotText } else { Self::Io(err.to_string()) }
    }
}

/// Clipboard write failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The platform has no clipboard.
    #[error("clipboard unsupported")]
    Unsupported,

    /// The write was attempted and failed.
    #[error("clipboard write failed: {0}")]
    Write(String),
}
