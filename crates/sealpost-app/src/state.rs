//! Observable workflow state types.
//!
//! These are the view-model pieces a driver renders: the wizard step, where a
//! key came from, and the notice currently surfaced to the user.

/// Step of the two-step wizard.
///
/// `AwaitingKey` is initial. Encryption is only reachable from `Composing`
/// with a loaded key and non-empty trimmed plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkflowState {
    /// No usable key yet.
    #[default]
    AwaitingKey,
    /// Key parsed and validated; input enabled.
    KeyReady,
    /// User is editing plaintext.
    Composing,
    /// Encryption in flight; controls disabled.
    Encrypting,
    /// Ciphertext displayed.
    Encrypted,
}

impl WorkflowState {
    /// Whether a new key may replace the current one in this state.
    pub fn accepts_key(self) -> bool {
        matches!(self, Self::AwaitingKey | Self::KeyReady | Self::Composing)
    }
}

/// Where key text came from.
///
/// Only the auto-loaded resource is checked against the pinned digest. A key
/// the user picked by hand is trusted as chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySource {
    /// The well-known resource fetched at startup.
    AutoLoad,
    /// A file the user selected.
    Manual,
}

/// Which control a file read was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileTarget {
    /// Manual key picker.
    KeyFile,
    /// File dropped onto the plaintext input.
    Plaintext,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// Blocks the whole page.
    Fatal,
    /// Degraded but usable.
    Warning,
    /// A recoverable operation failed.
    Error,
}

/// User-visible message, already localized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Headline text.
    pub message: String,
    /// Secondary explanation. `None` if the headline stands alone.
    pub detail: Option<String>,
}

impl Notice {
    /// Notice with a headline only.
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), detail: None }
    }

    /// Attach a secondary explanation.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
