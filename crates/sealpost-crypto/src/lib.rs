//! Sealpost OpenPGP capability
//!
//! Production [`PgpCapability`] backed by rPGP. Key parsing, algorithm
//! negotiation and message armoring are entirely rPGP's; this crate only maps
//! a parsed key onto [`KeyInfo`] and picks the component to encrypt to.
//!
//! # Encryption
//!
//! Messages are encrypted as a literal data packet under an AES-256 session
//! key, wrapped for the first encryption-capable subkey of the recipient. A
//! key whose subkeys cannot encrypt falls back to its primary key; a key with
//! no encryption-capable component at all is rejected.
//!
//! ```text
//! plaintext ──literal──▶ SEIPD(AES-256) ──PKESK(subkey)──▶ armor ──▶ ciphertext
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use pgp::{
    Deserializable, Message, SignedPublicKey,
    crypto::sym::SymmetricKeyAlgorithm,
    types::{KeyTrait, PublicParams},
};
use sealpost_core::{CapabilityError, KeyInfo, ParsedKey, PgpCapability};

/// rPGP-backed OpenPGP capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rpgp;

impl Rpgp {
    /// Create the capability.
    pub fn new() -> Self {
        Self
    }
}

impl PgpCapability for Rpgp {
    type PublicKey = SignedPublicKey;

    fn parse_public_key(&self, armored: &str) -> Result<ParsedKey<SignedPublicKey>, CapabilityError> {
        let (key, _headers) = SignedPublicKey::from_string(armored)
            .map_err(|e| CapabilityError::InvalidKey(e.to_string()))?;

        let info = describe(&key);
        tracing::debug!(fingerprint = %info.fingerprint_hex(), algorithm = %info.algorithm, "parsed public key");
        Ok(ParsedKey { key, info })
    }

    fn encrypt(&self, plaintext: &str, key: &SignedPublicKey) -> Result<String, CapabilityError> {
        let message = Message::new_literal("", plaintext);
        let mut rng = rand::thread_rng();
        let alg = SymmetricKeyAlgorithm::AES256;

        let encrypted = match key.public_subkeys.iter().find(|sub| sub.is_encryption_key()) {
            Some(subkey) => message.encrypt_to_keys(&mut rng, alg, &[subkey]),
            None if key.is_encryption_key() => {
                message.encrypt_to_keys(&mut rng, alg, &[&key.primary_key])
            },
            None => return Err(CapabilityError::NoEncryptionKey),
        }
        .map_err(|e| CapabilityError::Encrypt(e.to_string()))?;

        encrypted
            .to_armored_string(Default::default())
            .map_err(|e| CapabilityError::Encrypt(e.to_string()))
    }
}

/// Displayable metadata of a parsed key.
fn describe(key: &SignedPublicKey) -> KeyInfo {
    let raw_algorithm = format!("{:?}", key.algorithm());
    let bits = match key.primary_key.public_params() {
        PublicParams::RSA { n: modulus, .. }
        | PublicParams::DSA { p: modulus, .. }
        | PublicParams::Elgamal { p: modulus, .. } => u32::try_from(modulus.as_bytes().len() * 8).ok(),
        _ => None,
    };

    // Primary-flagged identity wins; keys without the flag show their first UID.
    let users = &key.details.users;
    let user_id = users
        .iter()
        .find(|user| user.is_primary())
        .or_else(|| users.first())
        .map(|user| String::from_utf8_lossy(user.id.id().as_ref()).into_owned())
        .unwrap_or_default();

    KeyInfo {
        fingerprint: key.fingerprint(),
        user_id,
        algorithm: raw_algorithm.to_lowercase(),
        bits,
        raw_algorithm,
    }
}

#[cfg(test)]
mod tests {
    use pgp::{
        KeyType, SecretKeyParamsBuilder, SignedSecretKey, SubkeyParamsBuilder,
        crypto::{ecc_curve::ECCCurve, public_key::PublicKeyAlgorithm},
        packet,
        types::{KeyVersion, Mpi, SecretKeyTrait, Version},
    };

    use super::*;

    /// Ed25519 primary, optionally with an X25519 encryption subkey and extra UIDs.
    fn generate(primary_uid: &str, extra_uids: &[&str], encryption_subkey: bool) -> SignedPublicKey {
        let mut params = SecretKeyParamsBuilder::default();
        params
            .key_type(KeyType::EdDSA)
            .can_certify(true)
            .can_sign(true)
            .primary_user_id(primary_uid.into())
            .passphrase(None);
        for uid in extra_uids {
            params.user_id(*uid);
        }
        if encryption_subkey {
            params.subkey(
                SubkeyParamsBuilder::default()
                    .key_type(KeyType::ECDH(ECCCurve::Curve25519))
                    .can_encrypt(true)
                    .passphrase(None)
                    .build()
                    .unwrap(),
            );
        }

        let secret: SignedSecretKey = params
            .build()
            .unwrap()
            .generate_with_rng(rand::thread_rng())
            .unwrap()
            .sign(String::new)
            .unwrap();
        secret.public_key().sign(&secret, String::new).unwrap()
    }

    fn armored(key: &SignedPublicKey) -> String {
        key.to_armored_string(Default::default()).unwrap()
    }

    #[test]
    fn parses_generated_key() {
        let key = generate("Alice <alice@example.com>", &[], true);
        let parsed = Rpgp::new().parse_public_key(&armored(&key)).unwrap();

        assert_eq!(parsed.info.fingerprint.len(), 20);
        assert_eq!(parsed.info.fingerprint, key.fingerprint());
        assert_eq!(parsed.info.user_id, "Alice <alice@example.com>");
        assert_eq!(parsed.info.recipient_email(), "alice@example.com");
        assert_eq!(parsed.info.bits, None);
        assert_eq!(parsed.info.algorithm_detail(), "eddsa (EdDSA)");
    }

    #[test]
    fn encrypts_to_encryption_subkey() {
        let key = generate("Alice <alice@example.com>", &[], true);
        let parsed = Rpgp::new().parse_public_key(&armored(&key)).unwrap();

        let ciphertext = Rpgp::new().encrypt("Hello", &parsed.key).unwrap();
        assert!(ciphertext.starts_with("-----BEGIN PGP MESSAGE-----"), "{ciphertext}");
        assert!(ciphertext.trim_end().ends_with("-----END PGP MESSAGE-----"), "{ciphertext}");
        assert!(!ciphertext.contains("Hello"));
    }

    #[test]
    fn sign_only_key_cannot_encrypt() {
        let key = generate("Signer <signer@example.com>", &[], false);
        let parsed = Rpgp::new().parse_public_key(&armored(&key)).unwrap();

        assert_eq!(Rpgp::new().encrypt("Hello", &parsed.key), Err(CapabilityError::NoEncryptionKey));
    }

    #[test]
    fn primary_uid_shown_even_when_listed_later() {
        let mut key = generate("Alice <alice@example.com>", &["Bob <bob@example.com>"], true);
        assert_eq!(describe(&key).user_id, "Alice <alice@example.com>");

        key.details.users.reverse();
        assert!(!key.details.users[0].is_primary());
        let info = describe(&key);
        assert_eq!(info.user_id, "Alice <alice@example.com>");
        assert_eq!(info.recipient_email(), "alice@example.com");
    }

    #[test]
    fn first_uid_used_without_primary_flag() {
        let mut key = generate("Alice <alice@example.com>", &["Bob <bob@example.com>"], true);
        key.details.users.retain(|user| !user.is_primary());

        assert_eq!(describe(&key).user_id, "Bob <bob@example.com>");
    }

    /// Swap the primary key material for `params`, keeping UIDs and subkeys.
    fn with_primary(
        mut key: SignedPublicKey,
        algorithm: PublicKeyAlgorithm,
        params: PublicParams,
    ) -> SignedPublicKey {
        let created_at = *key.primary_key.created_at();
        key.primary_key =
            packet::PublicKey::new(Version::New, KeyVersion::V4, algorithm, created_at, None, params)
                .unwrap();
        key
    }

    #[test]
    fn modulus_size_reported_for_dsa_and_elgamal() {
        let prime = || Mpi::from_raw(vec![0xC5; 256]);
        let small = || Mpi::from_raw(vec![0x07; 32]);
        let base = generate("Alice <alice@example.com>", &[], true);

        let dsa = with_primary(base.clone(), PublicKeyAlgorithm::DSA, PublicParams::DSA {
            p: prime(),
            q: small(),
            g: small(),
            y: prime(),
        });
        let info = describe(&dsa);
        assert_eq!(info.bits, Some(2048));
        assert_eq!(info.algorithm_label(), "dsa 2048");

        let elgamal = with_primary(base, PublicKeyAlgorithm::Elgamal, PublicParams::Elgamal {
            p: prime(),
            g: small(),
            y: prime(),
        });
        assert_eq!(describe(&elgamal).bits, Some(2048));
    }

    #[test]
    fn garbage_is_invalid_key() {
        let err = Rpgp::new().parse_public_key("not an armored key").unwrap_err();
        assert!(matches!(err, CapabilityError::InvalidKey(_)));
    }

    #[test]
    fn empty_is_invalid_key() {
        assert!(matches!(Rpgp::new().parse_public_key(""), Err(CapabilityError::InvalidKey(_))));
    }

    #[test]
    fn truncated_armor_is_invalid_key() {
        let armored = "-----BEGIN PGP PUBLIC KEY BLOCK-----\n\nmQINBGX\n-----END PGP PUBLIC KEY BLOCK-----\n";
        assert!(matches!(Rpgp::new().parse_public_key(armored), Err(CapabilityError::InvalidKey(_))));
    }

    #[test]
    fn always_ready() {
        assert_eq!(Rpgp::new().ready(), Ok(()));
    }
}
