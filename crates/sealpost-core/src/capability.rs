//! OpenPGP capability abstraction.
//!
//! Key parsing, algorithm negotiation and message armoring are delegated
//! wholesale to an external OpenPGP implementation. This trait is the seam:
//! production uses an rPGP-backed implementation, tests use a deterministic
//! fake.

use crate::{CapabilityError, KeyInfo};

/// A parsed public key: the opaque handle plus its displayable metadata.
#[derive(Debug, Clone)]
pub struct ParsedKey<K> {
    /// Implementation-specific key handle, passed back to `encrypt`.
    pub key: K,
    /// Metadata shown to the user.
    pub info: KeyInfo,
}

/// External OpenPGP collaborator.
///
/// # Invariants
///
/// - `parse_public_key` never panics on arbitrary input; malformed text is an
///   [`CapabilityError::InvalidKey`].
/// - `encrypt` output is armored text suitable for display and mail bodies.
/// - Calls are synchronous; callers own any scheduling.
pub trait PgpCapability: Send + Sync + 'static {
    /// Implementation-specific handle of a parsed public key.
    type PublicKey: Clone + Send + Sync;

    /// Whether the capability is loaded at all.
    ///
    /// An error here is fatal for the page: nothing else can work.
    fn ready(&self) -> Result<(), CapabilityError> {
        Ok(())
    }

    /// Parse armored public key text.
    fn parse_public_key(&self, armored: &str) -> Result<ParsedKey<Self::PublicKey>, CapabilityError>;

    /// Encrypt `plaintext` to `key`, returning armored ciphertext.
    fn encrypt(&self, plaintext: &str, key: &Self::PublicKey) -> Result<String, CapabilityError>;
}
