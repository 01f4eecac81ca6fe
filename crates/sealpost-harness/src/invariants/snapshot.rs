//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture what a user could see at a point in time. Invariants
//! operate on snapshots rather than the live workflow so a check sees one
//! consistent frame.

use sealpost_app::{NoticeKind, Workflow, WorkflowState};

/// Snapshot of the whole simulated system.
///
/// The current frame plus the sequence of wizard steps observed so far.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    /// Most recent rendered frame.
    pub current: WorkflowSnapshot,
    /// Wizard step of every rendered frame, oldest first.
    pub history: Vec<WorkflowState>,
}

impl SystemSnapshot {
    /// Create a snapshot with no history.
    pub fn single(current: WorkflowSnapshot) -> Self {
        Self { history: vec![current.state], current }
    }

    /// Create a snapshot with the given step history.
    pub fn with_history(current: WorkflowSnapshot, history: Vec<WorkflowState>) -> Self {
        Self { current, history }
    }
}

/// One rendered frame of the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowSnapshot {
    /// Wizard step.
    pub state: WorkflowState,
    /// Capability missing, page frozen.
    pub blocked: bool,
    /// A key is loaded.
    pub has_key: bool,
    /// Plaintext input enabled.
    pub input_enabled: bool,
    /// Encrypt control enabled.
    pub encrypt_enabled: bool,
    /// Details control enabled.
    pub details_enabled: bool,
    /// Ciphertext present.
    pub has_ciphertext: bool,
    /// Mail link present.
    pub has_mailto: bool,
    /// Copy control shows "copied".
    pub copy_feedback: bool,
    /// Manual key picker shown.
    pub manual_load_visible: bool,
    /// Severity of the surfaced notice.
    pub notice: Option<NoticeKind>,
}

impl WorkflowSnapshot {
    /// Capture the observable state of `workflow`.
    pub fn from_workflow(workflow: &Workflow) -> Self {
        Self {
            state: workflow.state(),
            blocked: workflow.is_blocked(),
            has_key: workflow.key().is_some(),
            input_enabled: workflow.input_enabled(),
            encrypt_enabled: workflow.encrypt_enabled(),
            details_enabled: workflow.details_enabled(),
            has_ciphertext: workflow.ciphertext().is_some(),
            has_mailto: workflow.mailto().is_some(),
            copy_feedback: workflow.copy_feedback_active(),
            manual_load_visible: workflow.manual_load_visible(),
            notice: workflow.notice().map(|notice| notice.kind),
        }
    }
}
