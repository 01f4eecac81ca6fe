//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use sealpost_app::WorkflowState;

use super::{Invariant, InvariantResult, SystemSnapshot, Violation};

/// Encryption steps require a loaded key.
pub struct EncryptionRequiresKey;

impl Invariant for EncryptionRequiresKey {
    fn name(&self) -> &'static str {
        "encryption_requires_key"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let frame = &state.current;
        let encrypting = matches!(frame.state, WorkflowState::Encrypting | WorkflowState::Encrypted);
        if encrypting && !frame.has_key {
            return Err(Violation {
                invariant: self.name(),
                message: format!("{:?} reached without a key", frame.state),
            });
        }
        Ok(())
    }
}

/// Ciphertext, mail link and copy feedback exist only in `Encrypted`.
///
/// Reset must clear all three; a stale ciphertext next to an editable input
/// would be sent for the wrong plaintext.
pub struct CiphertextMatchesState;

impl Invariant for CiphertextMatchesState {
    fn name(&self) -> &'static str {
        "ciphertext_matches_state"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let frame = &state.current;
        let encrypted = frame.state == WorkflowState::Encrypted;

        if frame.has_ciphertext != encrypted {
            return Err(Violation {
                invariant: self.name(),
                message: format!("ciphertext present={} in {:?}", frame.has_ciphertext, frame.state),
            });
        }
        if frame.has_mailto != frame.has_ciphertext {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "mailto present={} but ciphertext present={}",
                    frame.has_mailto, frame.has_ciphertext
                ),
            });
        }
        if frame.copy_feedback && !encrypted {
            return Err(Violation {
                invariant: self.name(),
                message: format!("copy feedback shown in {:?}", frame.state),
            });
        }
        Ok(())
    }
}

/// Input and encrypt controls are enabled exactly in `KeyReady` and `Composing`.
pub struct ControlsMatchState;

impl Invariant for ControlsMatchState {
    fn name(&self) -> &'static str {
        "controls_match_state"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let frame = &state.current;
        let editable = matches!(frame.state, WorkflowState::KeyReady | WorkflowState::Composing);

        if frame.input_enabled != editable || frame.encrypt_enabled != editable {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "{:?}: input_enabled={} encrypt_enabled={}",
                    frame.state, frame.input_enabled, frame.encrypt_enabled
                ),
            });
        }
        if frame.details_enabled != frame.has_key {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "details_enabled={} with has_key={}",
                    frame.details_enabled, frame.has_key
                ),
            });
        }
        Ok(())
    }
}

/// A page without the capability never leaves `AwaitingKey`.
pub struct BlockedStaysAwaiting;

impl Invariant for BlockedStaysAwaiting {
    fn name(&self) -> &'static str {
        "blocked_stays_awaiting"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let frame = &state.current;
        if !frame.blocked {
            return Ok(());
        }
        if frame.state != WorkflowState::AwaitingKey || frame.has_key || frame.manual_load_visible {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "blocked page in {:?} (has_key={}, manual_load_visible={})",
                    frame.state, frame.has_key, frame.manual_load_visible
                ),
            });
        }
        Ok(())
    }
}

/// Consecutive rendered steps follow the wizard's transition table.
pub struct TransitionValidity;

impl TransitionValidity {
    fn allowed(from: WorkflowState, to: WorkflowState) -> bool {
        use WorkflowState::{AwaitingKey, Composing, Encrypted, Encrypting, KeyReady};

        from == to
            || matches!(
                (from, to),
                (AwaitingKey, KeyReady)
                    | (KeyReady, Composing)
                    | (KeyReady, Encrypting)
                    | (Composing, KeyReady)
                    | (Composing, Encrypting)
                    | (Encrypting, Encrypted)
                    | (Encrypting, Composing)
                    | (Encrypted, Composing)
            )
    }
}

impl Invariant for TransitionValidity {
    fn name(&self) -> &'static str {
        "transition_validity"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for window in state.history.windows(2) {
            if !Self::allowed(window[0], window[1]) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("illegal transition {:?} → {:?}", window[0], window[1]),
                });
            }
        }
        Ok(())
    }
}
