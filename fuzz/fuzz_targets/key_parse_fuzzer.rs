//! Fuzz target for public key parsing
//!
//! Arbitrary bytes are offered to the rPGP-backed capability as armored key
//! text, and arbitrary user ids to the display helpers.
//!
//! # Invariants
//!
//! - Malformed key text is an error, never a panic
//! - A parsed key always has a fingerprint and a printable badge
//! - Recipient extraction never fails on any user id

#![no_main]

use libfuzzer_sys::fuzz_target;
use sealpost_core::{KeyInfo, MailtoLink, PgpCapability};
use sealpost_crypto::Rpgp;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    if let Ok(parsed) = Rpgp::new().parse_public_key(&text) {
        assert!(!parsed.info.fingerprint.is_empty());
        let _ = parsed.info.algorithm_badge();
        let _ = parsed.info.fingerprint_short();
    }

    let info = KeyInfo {
        fingerprint: data.iter().take(20).copied().collect(),
        user_id: text.into_owned(),
        algorithm: "rsa".into(),
        bits: None,
        raw_algorithm: "rsaEncryptSign".into(),
    };
    let recipient = info.recipient_email();
    assert!(!recipient.contains('>'));

    let uri = MailtoLink::for_ciphertext(&info, "ciphertext").to_uri();
    assert!(uri.starts_with("mailto:"));
});
