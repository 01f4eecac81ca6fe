//! Workflow state machine.
//!
//! This module defines the [`Workflow`] state machine, which owns the
//! interactive state of the page completely decoupled from I/O and from the
//! OpenPGP implementation.
//!
//! This is a pure state machine: it consumes [`crate::WorkflowEvent`] inputs
//! and produces [`crate::WorkflowAction`] instructions for the runtime to
//! execute.
//!
//! # Responsibilities
//!
//! - Drives the wizard: awaiting a key, composing, encrypting, encrypted.
//! - Serializes asynchronous operations by disabling the controls that
//!   triggered them until they complete.
//! - Translates every recoverable failure into a localized [`Notice`].

use sealpost_core::{KEY_RESOURCE_PATH, KeyInfo, KeyLoadError, Language, MailtoLink, Msg, Strings};
use zeroize::Zeroizing;

use crate::{
    COPY_FEEDBACK_DURATION, FileTarget, KeySource, Notice, NoticeKind, WorkflowAction,
    WorkflowEvent, WorkflowState,
};

/// Workflow state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct Workflow {
    /// Wizard step.
    state: WorkflowState,
    /// Localization table, fixed at construction.
    strings: Strings,
    /// OpenPGP capability reported missing. Blocks everything but quit.
    blocked: bool,
    /// Metadata of the loaded key. `None` until a load succeeds.
    key: Option<KeyInfo>,
    /// Current plaintext input.
    plaintext: Zeroizing<String>,
    /// Displayed ciphertext. `None` outside `Encrypted`.
    ciphertext: Option<String>,
    /// Mail composition link for the ciphertext.
    mailto: Option<String>,
    input_enabled: bool,
    encrypt_enabled: bool,
    details_enabled: bool,
    details_open: bool,
    encrypt_label: Msg,
    input_placeholder: Msg,
    manual_load_visible: bool,
    drag_active: bool,
    copy_feedback: bool,
    /// Bumped on every copy and reset so stale revert timers are ignored.
    copy_generation: u64,
    notice: Option<Notice>,
}

impl Workflow {
    /// Create a workflow rendering in `language`.
    pub fn new(language: Language) -> Self {
        Self {
            state: WorkflowState::AwaitingKey,
            strings: Strings::for_language(language),
            blocked: false,
            key: None,
            plaintext: Zeroizing::new(String::new()),
            ciphertext: None,
            mailto: None,
            input_enabled: false,
            encrypt_enabled: false,
            details_enabled: false,
            details_open: false,
            encrypt_label: Msg::BtnEncrypt,
            input_placeholder: Msg::PlaceholderMsg,
            manual_load_visible: false,
            drag_active: false,
            copy_feedback: false,
            copy_generation: 0,
            notice: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: WorkflowEvent) -> Vec<WorkflowAction> {
        if self.blocked && event != WorkflowEvent::QuitRequested {
            tracing::debug!(?event, "capability unavailable, event ignored");
            return vec![];
        }

        match event {
            WorkflowEvent::Started => {
                vec![
                    WorkflowAction::FetchKeyResource { path: KEY_RESOURCE_PATH.to_string() },
                    WorkflowAction::Render,
                ]
            },
            WorkflowEvent::CapabilityUnavailable => {
                self.blocked = true;
                self.input_enabled = false;
                self.encrypt_enabled = false;
                self.details_enabled = false;
                self.manual_load_visible = false;
                self.notice = Some(Notice::new(NoticeKind::Fatal, self.text(Msg::AlertNoOpenpgp)));
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::KeyResourceFetched { status, body } => {
                if self.state != WorkflowState::AwaitingKey {
                    return vec![];
                }
                if !(200..300).contains(&status) {
                    tracing::warn!(status, "auto-load failed");
                    self.show_manual_load();
                    return vec![WorkflowAction::Render];
                }
                if body.trim().is_empty() {
                    tracing::warn!("auto-load returned an empty key file");
                    self.show_manual_load();
                    return vec![WorkflowAction::Render];
                }
                vec![WorkflowAction::VerifyKey { content: body, source: KeySource::AutoLoad }]
            },
            WorkflowEvent::KeyResourceUnavailable { reason } => {
                if self.state != WorkflowState::AwaitingKey {
                    return vec![];
                }
                tracing::warn!(%reason, "auto-load failed");
                self.show_manual_load();
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::KeyFileChosen { path } => {
                if !self.state.accepts_key() {
                    return vec![];
                }
                vec![WorkflowAction::ReadKeyFile { path }]
            },
            WorkflowEvent::KeyFileRead { content } => {
                if !self.state.accepts_key() {
                    return vec![];
                }
                vec![WorkflowAction::VerifyKey { content, source: KeySource::Manual }]
            },
            WorkflowEvent::KeyLoaded { info, source } => {
                if !self.state.accepts_key() {
                    return vec![];
                }
                tracing::debug!(fingerprint = %info.fingerprint_hex(), ?source, "key loaded");
                self.key = Some(info);
                self.details_open = false;
                self.state = WorkflowState::KeyReady;
                self.manual_load_visible = false;
                self.notice = None;
                self.input_enabled = true;
                self.encrypt_enabled = true;
                self.details_enabled = true;
                self.input_placeholder = Msg::PlaceholderMsg;
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::KeyRejected { error, source } => {
                if !self.state.accepts_key() {
                    return vec![];
                }
                tracing::warn!(%error, ?source, "key rejected");
                let notice = match &error {
                    KeyLoadError::Integrity(_) => {
                        Notice::new(NoticeKind::Error, self.text(Msg::AlertIntegrityFail))
                    },
                    KeyLoadError::InvalidKey(reason) => Notice::new(
                        NoticeKind::Error,
                        format!("{}{reason}", self.text(Msg::AlertInvalidKey)),
                    ),
                };
                if self.key.is_none() {
                    self.show_manual_load();
                }
                self.notice = Some(notice);
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::InputChanged(text) => {
                if !self.input_enabled {
                    return vec![];
                }
                self.plaintext = Zeroizing::new(text);
                self.begin_composing();
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::DragEntered => {
                self.drag_active = true;
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::DragLeft => {
                self.drag_active = false;
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::FileDropped { path } => {
                self.drag_active = false;
                if !self.input_enabled {
                    return vec![WorkflowAction::Render];
                }
                vec![WorkflowAction::ReadDroppedFile { path }, WorkflowAction::Render]
            },
            WorkflowEvent::DroppedFileRead { content } => {
                if !self.input_enabled {
                    return vec![];
                }
                self.plaintext = Zeroizing::new(content);
                self.begin_composing();
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::FileReadFailed { target, reason } => {
                tracing::warn!(?target, %reason, "file read failed");
                match target {
                    FileTarget::KeyFile if self.state.accepts_key() => {
                        self.notice = Some(Notice::new(
                            NoticeKind::Error,
                            format!("{}{reason}", self.text(Msg::AlertInvalidKey)),
                        ));
                        vec![WorkflowAction::Render]
                    },
                    FileTarget::KeyFile | FileTarget::Plaintext => vec![],
                }
            },
            WorkflowEvent::EncryptRequested => self.request_encrypt(),
            WorkflowEvent::EncryptSucceeded { ciphertext } => {
                if self.state != WorkflowState::Encrypting {
                    return vec![];
                }
                self.mailto =
                    self.key.as_ref().map(|key| MailtoLink::for_ciphertext(key, &ciphertext).to_uri());
                self.ciphertext = Some(ciphertext);
                self.encrypt_label = Msg::BtnEncrypt;
                self.state = WorkflowState::Encrypted;
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::EncryptFailed { message } => {
                if self.state != WorkflowState::Encrypting {
                    return vec![];
                }
                tracing::warn!(%message, "encryption failed");
                self.state = WorkflowState::Composing;
                self.input_enabled = true;
                self.encrypt_enabled = true;
                self.encrypt_label = Msg::BtnEncrypt;
                self.notice = Some(Notice::new(
                    NoticeKind::Error,
                    format!("{}{message}", self.text(Msg::AlertEncryptFail)),
                ));
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::ResetRequested => {
                if self.state != WorkflowState::Encrypted {
                    return vec![];
                }
                self.ciphertext = None;
                self.mailto = None;
                self.copy_feedback = false;
                self.copy_generation += 1;
                self.notice = None;
                self.state = WorkflowState::Composing;
                self.input_enabled = true;
                self.encrypt_enabled = true;
                self.encrypt_label = Msg::BtnEncrypt;
                vec![WorkflowAction::Render, WorkflowAction::FocusInput]
            },
            WorkflowEvent::CopyRequested => match (&self.ciphertext, self.state) {
                (Some(text), WorkflowState::Encrypted) => {
                    vec![WorkflowAction::WriteClipboard { text: text.clone() }]
                },
                _ => vec![],
            },
            WorkflowEvent::CopySucceeded => {
                if self.state != WorkflowState::Encrypted {
                    return vec![];
                }
                self.copy_generation += 1;
                self.copy_feedback = true;
                vec![
                    WorkflowAction::Render,
                    WorkflowAction::ScheduleCopyRevert {
                        generation: self.copy_generation,
                        after: COPY_FEEDBACK_DURATION,
                    },
                ]
            },
            WorkflowEvent::CopyFailed => {
                self.notice = Some(Notice::new(NoticeKind::Error, self.text(Msg::AlertCopyFail)));
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::CopyFeedbackElapsed { generation } => {
                if !self.copy_feedback || generation != self.copy_generation {
                    return vec![];
                }
                self.copy_feedback = false;
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::DetailsToggled => {
                if !self.details_enabled {
                    return vec![];
                }
                self.details_open = !self.details_open;
                vec![WorkflowAction::Render]
            },
            WorkflowEvent::QuitRequested => vec![WorkflowAction::Quit],
        }
    }

    fn request_encrypt(&mut self) -> Vec<WorkflowAction> {
        let composing = matches!(self.state, WorkflowState::KeyReady | WorkflowState::Composing);
        if !composing || !self.encrypt_enabled || self.key.is_none() {
            return vec![];
        }
        if self.plaintext.trim().is_empty() {
            return vec![WorkflowAction::FocusInput];
        }

        self.state = WorkflowState::Encrypting;
        self.input_enabled = false;
        self.encrypt_enabled = false;
        self.encrypt_label = Msg::BtnEncrypting;
        self.notice = None;
        vec![WorkflowAction::Render, WorkflowAction::Encrypt { plaintext: self.plaintext.trim().to_string() }]
    }

    fn begin_composing(&mut self) {
        if self.state == WorkflowState::KeyReady {
            self.state = WorkflowState::Composing;
        }
    }

    fn show_manual_load(&mut self) {
        self.manual_load_visible = true;
        self.input_placeholder = Msg::Step0Waiting;
        self.notice = Some(
            Notice::new(NoticeKind::Warning, self.text(Msg::ErrorLoadTitle))
                .with_detail(self.text(Msg::ErrorLoadDesc)),
        );
    }

    fn text(&self, msg: Msg) -> &'static str {
        self.strings.get(msg)
    }

    /// Current wizard step.
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Localization table in use.
    pub fn strings(&self) -> &Strings {
        &self.strings
    }

    /// Whether the OpenPGP capability was reported missing.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Loaded key metadata. `None` until a load succeeds.
    pub fn key(&self) -> Option<&KeyInfo> {
        self.key.as_ref()
    }

    /// Current plaintext input.
    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    /// Displayed ciphertext. `None` unless encrypted.
    pub fn ciphertext(&self) -> Option<&str> {
        self.ciphertext.as_deref()
    }

    /// `mailto:` link for the ciphertext. `None` unless encrypted.
    pub fn mailto(&self) -> Option<&str> {
        self.mailto.as_deref()
    }

    /// Plaintext input accepts edits and drops.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Encrypt control is enabled.
    pub fn encrypt_enabled(&self) -> bool {
        self.encrypt_enabled
    }

    /// Details control is enabled.
    pub fn details_enabled(&self) -> bool {
        self.details_enabled
    }

    /// Details panel is expanded.
    pub fn details_open(&self) -> bool {
        self.details_open
    }

    /// Label of the encrypt control.
    pub fn encrypt_label(&self) -> &'static str {
        self.text(self.encrypt_label)
    }

    /// Placeholder of the plaintext input.
    pub fn input_placeholder(&self) -> &'static str {
        self.text(self.input_placeholder)
    }

    /// Label of the copy control.
    pub fn copy_label(&self) -> &'static str {
        if self.copy_feedback { self.text(Msg::BtnCopied) } else { self.text(Msg::BtnCopy) }
    }

    /// Manual key picker is shown.
    pub fn manual_load_visible(&self) -> bool {
        self.manual_load_visible
    }

    /// A drag is hovering over the plaintext input.
    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    /// Copy control shows its "copied" presentation.
    pub fn copy_feedback_active(&self) -> bool {
        self.copy_feedback
    }

    /// Current copy feedback generation.
    pub fn copy_generation(&self) -> u64 {
        self.copy_generation
    }

    /// Compose step is collapsed into its "encrypted" summary.
    pub fn compose_archived(&self) -> bool {
        self.state == WorkflowState::Encrypted
    }

    /// Result step is shown.
    pub fn result_visible(&self) -> bool {
        self.state == WorkflowState::Encrypted
    }

    /// Notice currently surfaced. `None` if nothing to report.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use sealpost_core::IntegrityError;

    use super::*;

    fn key_info() -> KeyInfo {
        KeyInfo {
            fingerprint: vec![0xAB; 20],
            user_id: "Alice <alice@example.com>".into(),
            algorithm: "rsa".into(),
            bits: Some(4096),
            raw_algorithm: "RSA".into(),
        }
    }

    fn ready_workflow() -> Workflow {
        let mut wf = Workflow::new(Language::En);
        let _ = wf.handle(WorkflowEvent::Started);
        let _ = wf.handle(WorkflowEvent::KeyLoaded { info: key_info(), source: KeySource::AutoLoad });
        wf
    }

    #[test]
    fn started_fetches_well_known_resource() {
        let mut wf = Workflow::new(Language::En);
        let actions = wf.handle(WorkflowEvent::Started);

        assert_eq!(actions, vec![
            WorkflowAction::FetchKeyResource { path: "./public.asc".into() },
            WorkflowAction::Render
        ]);
        assert_eq!(wf.state(), WorkflowState::AwaitingKey);
        assert!(!wf.input_enabled());
    }

    #[test]
    fn capability_missing_blocks_everything_but_quit() {
        let mut wf = Workflow::new(Language::En);
        let _ = wf.handle(WorkflowEvent::CapabilityUnavailable);

        assert!(wf.handle(WorkflowEvent::Started).is_empty());
        assert!(
            wf.handle(WorkflowEvent::KeyLoaded { info: key_info(), source: KeySource::Manual })
                .is_empty()
        );
        assert_eq!(wf.state(), WorkflowState::AwaitingKey);
        assert_eq!(wf.notice().map(|n| n.kind), Some(NoticeKind::Fatal));
        assert_eq!(wf.handle(WorkflowEvent::QuitRequested), vec![WorkflowAction::Quit]);
    }

    #[test]
    fn http_error_degrades_to_manual_load() {
        let mut wf = Workflow::new(Language::En);
        let actions =
            wf.handle(WorkflowEvent::KeyResourceFetched { status: 404, body: "not found".into() });

        assert_eq!(actions, vec![WorkflowAction::Render]);
        assert!(wf.manual_load_visible());
        assert_eq!(wf.input_placeholder(), "WAITING...");
        assert_eq!(wf.notice().map(|n| n.kind), Some(NoticeKind::Warning));
    }

    #[test]
    fn whitespace_body_degrades_to_manual_load() {
        let mut wf = Workflow::new(Language::En);
        let actions =
            wf.handle(WorkflowEvent::KeyResourceFetched { status: 200, body: " \n\t ".into() });

        assert_eq!(actions, vec![WorkflowAction::Render]);
        assert!(wf.manual_load_visible());
    }

    #[test]
    fn fetched_body_is_verified_as_auto_load() {
        let mut wf = Workflow::new(Language::En);
        let actions =
            wf.handle(WorkflowEvent::KeyResourceFetched { status: 200, body: "armored".into() });

        assert_eq!(actions, vec![WorkflowAction::VerifyKey {
            content: "armored".into(),
            source: KeySource::AutoLoad
        }]);
    }

    #[test]
    fn picked_file_is_verified_as_manual() {
        let mut wf = Workflow::new(Language::En);
        assert_eq!(wf.handle(WorkflowEvent::KeyFileChosen { path: "k.asc".into() }), vec![
            WorkflowAction::ReadKeyFile { path: "k.asc".into() }
        ]);
        assert_eq!(wf.handle(WorkflowEvent::KeyFileRead { content: "armored".into() }), vec![
            WorkflowAction::VerifyKey { content: "armored".into(), source: KeySource::Manual }
        ]);
    }

    #[test]
    fn integrity_rejection_shows_integrity_notice() {
        let mut wf = Workflow::new(Language::En);
        let error =
            KeyLoadError::Integrity(IntegrityError::Mismatch { expected: "a".into(), actual: "b".into() });
        let _ = wf.handle(WorkflowEvent::KeyRejected { error, source: KeySource::AutoLoad });

        assert_eq!(wf.state(), WorkflowState::AwaitingKey);
        assert!(wf.manual_load_visible());
        assert_eq!(
            wf.notice().map(|n| n.message.as_str()),
            Some("Security Warning: Public key file integrity check failed!")
        );
    }

    #[test]
    fn key_loaded_enables_controls() {
        let wf = ready_workflow();

        assert_eq!(wf.state(), WorkflowState::KeyReady);
        assert!(wf.input_enabled());
        assert!(wf.encrypt_enabled());
        assert!(wf.details_enabled());
        assert!(!wf.manual_load_visible());
        assert!(wf.notice().is_none());
        assert_eq!(wf.key().map(KeyInfo::recipient_email), Some("alice@example.com"));
    }

    #[test]
    fn empty_plaintext_only_refocuses() {
        let mut wf = ready_workflow();
        let _ = wf.handle(WorkflowEvent::InputChanged("   \n".into()));

        assert_eq!(wf.handle(WorkflowEvent::EncryptRequested), vec![WorkflowAction::FocusInput]);
        assert_eq!(wf.state(), WorkflowState::Composing);
        assert!(wf.input_enabled());
    }

    #[test]
    fn encrypt_without_key_is_noop() {
        let mut wf = Workflow::new(Language::En);
        assert!(wf.handle(WorkflowEvent::EncryptRequested).is_empty());
        assert_eq!(wf.state(), WorkflowState::AwaitingKey);
    }

    #[test]
    fn encrypt_disables_controls_until_done() {
        let mut wf = ready_workflow();
        let _ = wf.handle(WorkflowEvent::InputChanged("Hello".into()));
        let actions = wf.handle(WorkflowEvent::EncryptRequested);

        assert_eq!(actions, vec![WorkflowAction::Render, WorkflowAction::Encrypt {
            plaintext: "Hello".into()
        }]);
        assert_eq!(wf.state(), WorkflowState::Encrypting);
        assert_eq!(wf.encrypt_label(), "Processing...");
        assert!(!wf.input_enabled());
        assert!(wf.handle(WorkflowEvent::EncryptRequested).is_empty());

        let _ = wf.handle(WorkflowEvent::EncryptSucceeded { ciphertext: "CT".into() });
        assert_eq!(wf.state(), WorkflowState::Encrypted);
        assert_eq!(wf.ciphertext(), Some("CT"));
        assert_eq!(wf.mailto(), Some("mailto:alice@example.com?subject=Encrypted%20Message&body=CT"));
        assert!(wf.compose_archived());
        assert!(wf.result_visible());
    }

    #[test]
    fn encrypts_trimmed_text_but_keeps_input() {
        let mut wf = ready_workflow();
        let _ = wf.handle(WorkflowEvent::InputChanged("  Hello\n".into()));
        let actions = wf.handle(WorkflowEvent::EncryptRequested);

        assert_eq!(actions, vec![WorkflowAction::Render, WorkflowAction::Encrypt {
            plaintext: "Hello".into()
        }]);
        assert_eq!(wf.plaintext(), "  Hello\n");
    }

    #[test]
    fn encrypt_failure_returns_to_compose() {
        let mut wf = ready_workflow();
        let _ = wf.handle(WorkflowEvent::InputChanged("Hello".into()));
        let _ = wf.handle(WorkflowEvent::EncryptRequested);
        let _ = wf.handle(WorkflowEvent::EncryptFailed { message: "boom".into() });

        assert_eq!(wf.state(), WorkflowState::Composing);
        assert!(wf.input_enabled());
        assert!(wf.encrypt_enabled());
        assert_eq!(wf.encrypt_label(), "Encrypt Message");
        assert_eq!(wf.notice().map(|n| n.message.as_str()), Some("Encryption failed: boom"));
        assert_eq!(wf.plaintext(), "Hello");
    }

    #[test]
    fn key_loads_ignored_while_encrypting() {
        let mut wf = ready_workflow();
        let _ = wf.handle(WorkflowEvent::InputChanged("Hello".into()));
        let _ = wf.handle(WorkflowEvent::EncryptRequested);

        let other = KeyInfo { user_id: "Bob <bob@example.com>".into(), ..key_info() };
        assert!(
            wf.handle(WorkflowEvent::KeyLoaded { info: other, source: KeySource::Manual }).is_empty()
        );
        assert_eq!(wf.key().map(KeyInfo::recipient_email), Some("alice@example.com"));
    }

    #[test]
    fn drop_ignored_while_input_disabled() {
        let mut wf = Workflow::new(Language::En);
        let _ = wf.handle(WorkflowEvent::DragEntered);
        assert!(wf.drag_active());

        let actions = wf.handle(WorkflowEvent::FileDropped { path: "msg.txt".into() });
        assert_eq!(actions, vec![WorkflowAction::Render]);
        assert!(!wf.drag_active());
        assert!(wf.handle(WorkflowEvent::DroppedFileRead { content: "x".into() }).is_empty());
        assert_eq!(wf.plaintext(), "");
    }

    #[test]
    fn dropped_file_replaces_plaintext() {
        let mut wf = ready_workflow();
        let _ = wf.handle(WorkflowEvent::InputChanged("old".into()));
        assert_eq!(wf.handle(WorkflowEvent::FileDropped { path: "msg.txt".into() }), vec![
            WorkflowAction::ReadDroppedFile { path: "msg.txt".into() },
            WorkflowAction::Render
        ]);
        let _ = wf.handle(WorkflowEvent::DroppedFileRead { content: "new".into() });
        assert_eq!(wf.plaintext(), "new");
    }

    #[test]
    fn stale_copy_revert_is_ignored() {
        let mut wf = ready_workflow();
        let _ = wf.handle(WorkflowEvent::InputChanged("Hello".into()));
        let _ = wf.handle(WorkflowEvent::EncryptRequested);
        let _ = wf.handle(WorkflowEvent::EncryptSucceeded { ciphertext: "CT".into() });

        assert_eq!(wf.handle(WorkflowEvent::CopyRequested), vec![WorkflowAction::WriteClipboard {
            text: "CT".into()
        }]);
        let _ = wf.handle(WorkflowEvent::CopySucceeded);
        let first = wf.copy_generation();
        let _ = wf.handle(WorkflowEvent::CopySucceeded);
        assert_eq!(wf.copy_label(), "Copied");

        assert!(wf.handle(WorkflowEvent::CopyFeedbackElapsed { generation: first }).is_empty());
        assert!(wf.copy_feedback_active());

        let _ = wf.handle(WorkflowEvent::CopyFeedbackElapsed { generation: wf.copy_generation() });
        assert_eq!(wf.copy_label(), "Copy Ciphertext");
    }

    #[test]
    fn copy_failure_keeps_state() {
        let mut wf = ready_workflow();
        let _ = wf.handle(WorkflowEvent::InputChanged("Hello".into()));
        let _ = wf.handle(WorkflowEvent::EncryptRequested);
        let _ = wf.handle(WorkflowEvent::EncryptSucceeded { ciphertext: "CT".into() });
        let _ = wf.handle(WorkflowEvent::CopyFailed);

        assert_eq!(wf.state(), WorkflowState::Encrypted);
        assert_eq!(wf.ciphertext(), Some("CT"));
        assert_eq!(
            wf.notice().map(|n| n.message.as_str()),
            Some("Copy failed, please copy manually")
        );
    }

    #[test]
    fn details_toggle_requires_key() {
        let mut wf = Workflow::new(Language::En);
        assert!(wf.handle(WorkflowEvent::DetailsToggled).is_empty());

        let mut wf = ready_workflow();
        let _ = wf.handle(WorkflowEvent::DetailsToggled);
        assert!(wf.details_open());
        let _ = wf.handle(WorkflowEvent::DetailsToggled);
        assert!(!wf.details_open());
    }

    #[test]
    fn new_key_closes_details_panel() {
        let mut wf = Workflow::new(Language::En);
        let _ = wf.handle(WorkflowEvent::KeyLoaded { info: key_info(), source: KeySource::AutoLoad });
        let _ = wf.handle(WorkflowEvent::DetailsToggled);
        assert!(wf.details_open());

        let other = KeyInfo { user_id: "Bob <bob@example.com>".into(), ..key_info() };
        let _ = wf.handle(WorkflowEvent::KeyLoaded { info: other, source: KeySource::Manual });
        assert!(!wf.details_open());
        assert_eq!(wf.key().map(KeyInfo::recipient_email), Some("bob@example.com"));
    }

    #[test]
    fn only_2xx_status_is_verified() {
        for status in [199, 300, 304, 500] {
            let mut wf = Workflow::new(Language::En);
            let actions = wf.handle(WorkflowEvent::KeyResourceFetched { status, body: "armored".into() });
            assert_eq!(actions, vec![WorkflowAction::Render], "status {status}");
            assert!(wf.manual_load_visible());
        }
        for status in [200, 204, 299] {
            let mut wf = Workflow::new(Language::En);
            let actions = wf.handle(WorkflowEvent::KeyResourceFetched { status, body: "armored".into() });
            assert!(matches!(actions.as_slice(), [WorkflowAction::VerifyKey { .. }]), "status {status}");
        }
    }

    #[test]
    fn chinese_labels() {
        let mut wf = Workflow::new(Language::Zh);
        let _ = wf.handle(WorkflowEvent::KeyResourceUnavailable { reason: "offline".into() });
        assert_eq!(wf.input_placeholder(), "等待加载...");
        assert_eq!(wf.encrypt_label(), "执行加密");
    }
}
