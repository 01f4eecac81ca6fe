//! Content integrity pinning.
//!
//! The auto-loaded recipient key is trusted only if its SHA-256 digest,
//! base64-encoded, equals a value pinned at build time. Manually loaded keys
//! bypass this check: the user chose that file explicitly.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

use crate::IntegrityError;

/// SHA-256 of `content`, base64-encoded with the standard padded alphabet.
pub fn sha256_base64(content: impl AsRef<[u8]>) -> String {
    STANDARD.encode(Sha256::digest(content.as_ref()))
}

/// Subresource-integrity form (`sha256-<base64>`) of `content`.
pub fn sri(content: impl AsRef<[u8]>) -> String {
    format!("sha256-{}", sha256_base64(content))
}

/// Pinned base64 SHA-256 digest of the well-known key resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityDigest(String);

impl IntegrityDigest {
    /// Pin an expected digest.
    ///
    /// Accepts either the bare base64 value or the `sha256-` prefixed SRI form.
    /// Returns `None` for an empty value, which means "not configured".
    pub fn new(expected: impl Into<String>) -> Option<Self> {
        let expected = expected.into();
        let bare = expected.strip_prefix("sha256-").unwrap_or(&expected).trim();
        if bare.is_empty() { None } else { Some(Self(bare.to_string())) }
    }

    /// Pinned base64 value.
    pub fn expected(&self) -> &str {
        &self.0
    }

    /// Hash `content` and compare against the pinned value.
    ///
    /// Comparison is exact string equality on the base64 text.
    pub fn verify(&self, content: impl AsRef<[u8]>) -> Result<(), IntegrityError> {
        let actual = sha256_base64(content);
        if actual == self.0 {
            Ok(())
        } else {
            tracing::error!(expected = %self.0, %actual, "integrity check failed");
            Err(IntegrityError::Mismatch { expected: self.0.clone(), actual })
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn known_digests() {
        assert_eq!(sha256_base64(""), "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
        assert_eq!(sha256_base64("abc"), "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=");
        assert_eq!(sri("abc"), "sha256-ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=");
    }

    #[test]
    fn empty_pin_is_not_configured() {
        assert!(IntegrityDigest::new("").is_none());
        assert!(IntegrityDigest::new("  ").is_none());
        assert!(IntegrityDigest::new("sha256-").is_none());
    }

    #[test]
    fn sri_prefix_is_accepted() {
        let pin = IntegrityDigest::new("sha256-ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=");
        assert_eq!(pin.map(|p| p.verify("abc")), Some(Ok(())));
    }

    #[test]
    fn mismatch_reports_both_digests() {
        let Some(pin) = IntegrityDigest::new(sha256_base64("original key")) else {
            panic!("pin should be configured");
        };

        let err = pin.verify("tampered key").unwrap_err();
        let IntegrityError::Mismatch { expected, actual } = err;
        assert_eq!(expected, sha256_base64("original key"));
        assert_eq!(actual, sha256_base64("tampered key"));
    }

    proptest! {
        #[test]
        fn prop_verify_accepts_only_exact_content(a in ".*", b in ".*") {
            let Some(pin) = IntegrityDigest::new(sha256_base64(&a)) else {
                return Err(TestCaseError::fail("digest is never empty"));
            };
            prop_assert!(pin.verify(&a).is_ok());
            prop_assert_eq!(pin.verify(&b).is_ok(), a == b);
        }
    }
}
