//! Deterministic OpenPGP capability double.
//!
//! `FakePgp` speaks a trivial armor so tests can build keys and read back
//! "ciphertext" without any real cryptography. Call counters and failure
//! switches live behind an `Arc`, so a clone kept by the test observes the
//! instance the runtime owns.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use sealpost_core::{CapabilityError, KeyInfo, ParsedKey, PgpCapability};

const KEY_HEADER: &str = "-----BEGIN FAKE PUBLIC KEY-----";
const KEY_FOOTER: &str = "-----END FAKE PUBLIC KEY-----";
const MESSAGE_HEADER: &str = "-----BEGIN FAKE MESSAGE-----";
const MESSAGE_FOOTER: &str = "-----END FAKE MESSAGE-----";

/// Key handle produced by [`FakePgp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeKey {
    /// 20-byte fingerprint derived from the user id.
    pub fingerprint: Vec<u8>,
    /// User id carried in the armor.
    pub user_id: String,
}

#[derive(Default)]
struct FakeState {
    unavailable: AtomicBool,
    fail_encrypt: AtomicBool,
    parse_calls: AtomicUsize,
    encrypt_calls: AtomicUsize,
}

/// Deterministic [`PgpCapability`] for tests.
#[derive(Clone, Default)]
pub struct FakePgp {
    state: Arc<FakeState>,
}

impl FakePgp {
    /// Create an available capability.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a capability that reports itself as not loaded.
    pub fn unavailable() -> Self {
        let pgp = Self::new();
        pgp.state.unavailable.store(true, Ordering::SeqCst);
        pgp
    }

    /// Make every subsequent `encrypt` fail.
    pub fn set_fail_encrypt(&self, fail: bool) {
        self.state.fail_encrypt.store(fail, Ordering::SeqCst);
    }

    /// Number of `parse_public_key` calls so far.
    pub fn parse_calls(&self) -> usize {
        self.state.parse_calls.load(Ordering::SeqCst)
    }

    /// Number of `encrypt` calls so far.
    pub fn encrypt_calls(&self) -> usize {
        self.state.encrypt_calls.load(Ordering::SeqCst)
    }

    /// Armored key text for `user_id`.
    pub fn armor(user_id: &str) -> String {
        format!("{KEY_HEADER}\n{user_id}\n{KEY_FOOTER}\n")
    }

    /// Read back fake ciphertext as `(fingerprint hex, plaintext)`.
    pub fn open(ciphertext: &str) -> Option<(String, String)> {
        let body = ciphertext.strip_prefix(MESSAGE_HEADER)?.strip_suffix(MESSAGE_FOOTER)?;
        let body = body.strip_prefix('\n')?.strip_suffix('\n')?;
        let (fingerprint, plaintext) = body.split_once('\n')?;
        Some((fingerprint.to_string(), plaintext.to_string()))
    }
}

impl PgpCapability for FakePgp {
    type PublicKey = FakeKey;

    fn ready(&self) -> Result<(), CapabilityError> {
        if self.state.unavailable.load(Ordering::SeqCst) {
            return Err(CapabilityError::Unavailable("fake capability disabled".into()));
        }
        Ok(())
    }

    fn parse_public_key(&self, armored: &str) -> Result<ParsedKey<FakeKey>, CapabilityError> {
        self.state.parse_calls.fetch_add(1, Ordering::SeqCst);

        let body = armored
            .trim()
            .strip_prefix(KEY_HEADER)
            .and_then(|rest| rest.strip_suffix(KEY_FOOTER))
            .ok_or_else(|| CapabilityError::InvalidKey("Misformed armored text".into()))?;

        let user_id = body.trim().to_string();
        let fingerprint = fingerprint_of(&user_id);
        let info = KeyInfo {
            fingerprint: fingerprint.clone(),
            user_id: user_id.clone(),
            algorithm: "rsa".into(),
            bits: Some(4096),
            raw_algorithm: "rsaEncryptSign".into(),
        };

        Ok(ParsedKey { key: FakeKey { fingerprint, user_id }, info })
    }

    fn encrypt(&self, plaintext: &str, key: &FakeKey) -> Result<String, CapabilityError> {
        self.state.encrypt_calls.fetch_add(1, Ordering::SeqCst);

        if self.state.fail_encrypt.load(Ordering::SeqCst) {
            return Err(CapabilityError::Encrypt("Error encrypting message".into()));
        }

        let fingerprint: String = key.fingerprint.iter().map(|b| format!("{b:02X}")).collect();
        Ok(format!("{MESSAGE_HEADER}\n{fingerprint}\n{plaintext}\n{MESSAGE_FOOTER}"))
    }
}

/// FNV-1a over the user id, spread over 20 bytes.
fn fingerprint_of(user_id: &str) -> Vec<u8> {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = user_id.bytes().fold(OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(PRIME));
    (0u8..20).map(|i| (hash >> ((i % 8) * 8)) as u8 ^ i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_parses_back() {
        let pgp = FakePgp::new();
        let parsed = pgp.parse_public_key(&FakePgp::armor("Alice <alice@example.com>")).unwrap();

        assert_eq!(parsed.info.user_id, "Alice <alice@example.com>");
        assert_eq!(parsed.info.fingerprint.len(), 20);
        assert_eq!(pgp.parse_calls(), 1);
    }

    #[test]
    fn fingerprints_differ_per_user() {
        assert_ne!(fingerprint_of("alice"), fingerprint_of("bob"));
        assert_eq!(fingerprint_of("alice"), fingerprint_of("alice"));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = FakePgp::new().parse_public_key("hello").unwrap_err();
        assert_eq!(err, CapabilityError::InvalidKey("Misformed armored text".into()));
    }

    #[test]
    fn ciphertext_opens() {
        let pgp = FakePgp::new();
        let key = pgp.parse_public_key(&FakePgp::armor("Bob")).unwrap().key;
        let ciphertext = pgp.encrypt("line one\nline two", &key).unwrap();

        let (fingerprint, plaintext) = FakePgp::open(&ciphertext).unwrap();
        assert_eq!(fingerprint.len(), 40);
        assert_eq!(plaintext, "line one\nline two");
    }

    #[test]
    fn clones_share_counters_and_switches() {
        let pgp = FakePgp::new();
        let handle = pgp.clone();
        handle.set_fail_encrypt(true);

        let key = pgp.parse_public_key(&FakePgp::armor("Bob")).unwrap().key;
        assert!(pgp.encrypt("x", &key).is_err());
        assert_eq!(handle.encrypt_calls(), 1);
        assert_eq!(handle.parse_calls(), 1);
    }

    #[test]
    fn unavailable_is_not_ready() {
        assert!(matches!(FakePgp::unavailable().ready(), Err(CapabilityError::Unavailable(_))));
    }
}
