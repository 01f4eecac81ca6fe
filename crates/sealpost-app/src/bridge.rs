//! Capability-to-Workflow translation layer.
//!
//! The [`Bridge`] wraps the external [`PgpCapability`] and adapts it to the
//! workflow lifecycle.
//!
//! # Responsibilities
//!
//! - Checks auto-loaded key text against the pinned [`IntegrityDigest`] before
//!   the capability ever sees it.
//! - Keeps the opaque key handle the capability returned, so the workflow only
//!   ever deals with displayable [`sealpost_core::KeyInfo`].
//! - Converts every capability result back into [`crate::WorkflowEvent`]s.
//!   Failures become events; nothing escapes as an error.

use sealpost_core::{CapabilityError, IntegrityDigest, KeyInfo, KeyLoadError, PgpCapability};

use crate::{KeySource, WorkflowAction, WorkflowEvent};

/// Bridge between Workflow and the OpenPGP capability.
pub struct Bridge<C: PgpCapability> {
    capability: C,
    pinned: Option<IntegrityDigest>,
    key: Option<C::PublicKey>,
}

impl<C: PgpCapability> Bridge<C> {
    /// Create a bridge. `pinned` guards the auto-loaded key resource only.
    pub fn new(capability: C, pinned: Option<IntegrityDigest>) -> Self {
        Self { capability, pinned, key: None }
    }

    /// Whether the capability is loaded.
    ///
    /// # Errors
    ///
    /// Returns the capability's own error when it is unavailable.
    pub fn ready(&self) -> Result<(), CapabilityError> {
        self.capability.ready()
    }

    /// Underlying capability.
    pub fn capability(&self) -> &C {
        &self.capability
    }

    /// Whether a key handle is held.
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Process a Workflow action and return resulting Workflow events.
    ///
    /// Only `VerifyKey` and `Encrypt` reach the capability; every other action
    /// is the driver's business and yields no events here.
    pub fn process_action(&mut self, action: WorkflowAction) -> Vec<WorkflowEvent> {
        match action {
            WorkflowAction::VerifyKey { content, source } => match self.load_key(&content, source) {
                Ok(info) => vec![WorkflowEvent::KeyLoaded { info, source }],
                Err(error) => vec![WorkflowEvent::KeyRejected { error, source }],
            },
            WorkflowAction::Encrypt { plaintext } => {
                let Some(key) = &self.key else {
                    tracing::warn!("encrypt requested with no key loaded");
                    return vec![WorkflowEvent::EncryptFailed {
                        message: KeyLoadError::InvalidKey("no key loaded".into()).to_string(),
                    }];
                };
                match self.capability.encrypt(&plaintext, key) {
                    Ok(ciphertext) => vec![WorkflowEvent::EncryptSucceeded { ciphertext }],
                    Err(e) => vec![WorkflowEvent::EncryptFailed { message: e.to_string() }],
                }
            },
            WorkflowAction::Render
            | WorkflowAction::Quit
            | WorkflowAction::FetchKeyResource { .. }
            | WorkflowAction::ReadKeyFile { .. }
            | WorkflowAction::ReadDroppedFile { .. }
            | WorkflowAction::WriteClipboard { .. }
            | WorkflowAction::ScheduleCopyRevert { .. }
            | WorkflowAction::FocusInput => vec![],
        }
    }

    fn load_key(&mut self, content: &str, source: KeySource) -> Result<KeyInfo, KeyLoadError> {
        if source == KeySource::AutoLoad
            && let Some(pinned) = &self.pinned
        {
            pinned.verify(content)?;
        }

        let parsed = self.capability.parse_public_key(content)?;
        self.key = Some(parsed.key);
        Ok(parsed.info)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use sealpost_core::{ParsedKey, sha256_base64};

    use super::*;

    #[derive(Default)]
    struct TestPgp {
        parses: AtomicUsize,
    }

    impl PgpCapability for TestPgp {
        type PublicKey = String;

        fn parse_public_key(&self, armored: &str) -> Result<ParsedKey<String>, CapabilityError> {
            self.parses.fetch_add(1, Ordering::SeqCst);
            if !armored.starts_with("KEY:") {
                return Err(CapabilityError::InvalidKey("not a key".into()));
            }
            let info = KeyInfo {
                fingerprint: vec![1, 2, 3, 4],
                user_id: armored.trim_start_matches("KEY:").to_string(),
                algorithm: "ecdh".into(),
                bits: None,
                raw_algorithm: "ECDH".into(),
            };
            Ok(ParsedKey { key: armored.to_string(), info })
        }

        fn encrypt(&self, plaintext: &str, key: &String) -> Result<String, CapabilityError> {
            Ok(format!("{key}|{plaintext}"))
        }
    }

    #[test]
    fn matching_digest_loads_key() {
        let content = "KEY:Alice <alice@example.com>";
        let pinned = IntegrityDigest::new(sha256_base64(content));
        let mut bridge = Bridge::new(TestPgp::default(), pinned);

        let events = bridge.process_action(WorkflowAction::VerifyKey {
            content: content.into(),
            source: KeySource::AutoLoad,
        });
        assert!(matches!(events.as_slice(), [WorkflowEvent::KeyLoaded {
            source: KeySource::AutoLoad,
            ..
        }]));
        assert!(bridge.has_key());
    }

    #[test]
    fn mismatched_digest_never_parses() {
        let pinned = IntegrityDigest::new(sha256_base64("something else"));
        let mut bridge = Bridge::new(TestPgp::default(), pinned);

        let events = bridge.process_action(WorkflowAction::VerifyKey {
            content: "KEY:Mallory".into(),
            source: KeySource::AutoLoad,
        });
        assert!(matches!(events.as_slice(), [WorkflowEvent::KeyRejected {
            error: KeyLoadError::Integrity(_),
            ..
        }]));
        assert_eq!(bridge.capability().parses.load(Ordering::SeqCst), 0);
        assert!(!bridge.has_key());
    }

    #[test]
    fn manual_load_bypasses_pin() {
        let pinned = IntegrityDigest::new(sha256_base64("something else"));
        let mut bridge = Bridge::new(TestPgp::default(), pinned);

        let events = bridge.process_action(WorkflowAction::VerifyKey {
            content: "KEY:Bob".into(),
            source: KeySource::Manual,
        });
        assert!(matches!(events.as_slice(), [WorkflowEvent::KeyLoaded { .. }]));
    }

    #[test]
    fn parse_failure_becomes_invalid_key() {
        let mut bridge = Bridge::new(TestPgp::default(), None);
        let events = bridge.process_action(WorkflowAction::VerifyKey {
            content: "garbage".into(),
            source: KeySource::AutoLoad,
        });
        assert_eq!(events, vec![WorkflowEvent::KeyRejected {
            error: KeyLoadError::InvalidKey("not a key".into()),
            source: KeySource::AutoLoad
        }]);
    }

    #[test]
    fn encrypt_uses_loaded_key() {
        let mut bridge = Bridge::new(TestPgp::default(), None);
        let _ = bridge.process_action(WorkflowAction::VerifyKey {
            content: "KEY:Bob".into(),
            source: KeySource::Manual,
        });

        let events = bridge.process_action(WorkflowAction::Encrypt { plaintext: "hi".into() });
        assert_eq!(events, vec![WorkflowEvent::EncryptSucceeded { ciphertext: "KEY:Bob|hi".into() }]);
    }

    #[test]
    fn encrypt_without_key_fails_as_event() {
        let mut bridge = Bridge::new(TestPgp::default(), None);
        let events = bridge.process_action(WorkflowAction::Encrypt { plaintext: "hi".into() });
        assert!(matches!(events.as_slice(), [WorkflowEvent::EncryptFailed { .. }]));
    }
}
