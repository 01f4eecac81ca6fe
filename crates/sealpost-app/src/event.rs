//! Workflow input events.
//!
//! This module defines [`WorkflowEvent`], the complete set of inputs that drive
//! the [`crate::Workflow`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (typing, drag-and-drop, button presses).
//! - Completions of asynchronous operations the runtime performed on the
//!   workflow's behalf (fetch, file read, key verification, encryption,
//!   clipboard write, timers).

use sealpost_core::{KeyInfo, KeyLoadError};

use crate::{FileTarget, KeySource};

/// Events processed by the Workflow state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// Page finished loading.
    Started,

    /// The OpenPGP capability is not loaded.
    CapabilityUnavailable,

    /// The well-known key resource answered.
    ///
    /// Non-success statuses arrive here too; they are not fetch errors.
    KeyResourceFetched {
        /// HTTP-style status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// The well-known key resource could not be fetched at all.
    KeyResourceUnavailable {
        /// Failure description for logs.
        reason: String,
    },

    /// User picked a key file by hand.
    KeyFileChosen {
        /// Location of the picked file.
        path: String,
    },

    /// Picked key file was read.
    KeyFileRead {
        /// File content.
        content: String,
    },

    /// Key text passed verification and parsed.
    KeyLoaded {
        /// Metadata of the new key.
        info: KeyInfo,
        /// Where the key text came from.
        source: KeySource,
    },

    /// Key text was rejected.
    KeyRejected {
        /// Why it was rejected.
        error: KeyLoadError,
        /// Where the key text came from.
        source: KeySource,
    },

    /// Plaintext input edited. Carries the whole new content.
    InputChanged(String),

    /// A drag entered the plaintext input.
    DragEntered,

    /// A drag left the plaintext input.
    DragLeft,

    /// A file was dropped onto the plaintext input.
    FileDropped {
        /// Location of the dropped file.
        path: String,
    },

    /// Dropped file was read.
    DroppedFileRead {
        /// File content.
        content: String,
    },

    /// A file read failed.
    FileReadFailed {
        /// Which control asked for the read.
        target: FileTarget,
        /// Failure description.
        reason: String,
    },

    /// User invoked encrypt.
    EncryptRequested,

    /// Encryption finished.
    EncryptSucceeded {
        /// Armored ciphertext.
        ciphertext: String,
    },

    /// Encryption failed.
    EncryptFailed {
        /// Underlying error text.
        message: String,
    },

    /// User asked to return to editing.
    ResetRequested,

    /// User asked to copy the ciphertext.
    CopyRequested,

    /// Clipboard write succeeded.
    CopySucceeded,

    /// Clipboard write failed.
    CopyFailed,

    /// Copy feedback timer fired.
    CopyFeedbackElapsed {
        /// Generation the timer was scheduled for.
        generation: u64,
    },

    /// User toggled the key details panel.
    DetailsToggled,

    /// User closed the page.
    QuitRequested,
}
