//! Workflow side-effects and intents.
//!
//! This module defines the [`WorkflowAction`] enum, which represents
//! instructions produced by the [`crate::Workflow`] state machine for the
//! runtime to execute.

use std::time::Duration;

use crate::KeySource;

/// How long the copy control shows its "copied" presentation.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Actions produced by the Workflow state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowAction {
    /// Render the page.
    Render,

    /// Quit the application.
    Quit,

    /// Fetch the well-known key resource.
    FetchKeyResource {
        /// Relative resource path.
        path: String,
    },

    /// Read a user-picked key file.
    ReadKeyFile {
        /// Location of the file.
        path: String,
    },

    /// Read a file dropped onto the plaintext input.
    ReadDroppedFile {
        /// Location of the file.
        path: String,
    },

    /// Check integrity (auto-load only) and parse key text.
    VerifyKey {
        /// Armored key text.
        content: String,
        /// Where the text came from.
        source: KeySource,
    },

    /// Encrypt plaintext to the loaded key.
    Encrypt {
        /// Message to encrypt.
        plaintext: String,
    },

    /// Copy text to the system clipboard.
    WriteClipboard {
        /// Text to copy.
        text: String,
    },

    /// Deliver `CopyFeedbackElapsed { generation }` after a delay.
    ScheduleCopyRevert {
        /// Feedback generation to revert.
        generation: u64,
        /// Delay before delivery.
        after: Duration,
    },

    /// Move input focus to the plaintext input.
    FocusInput,
}
