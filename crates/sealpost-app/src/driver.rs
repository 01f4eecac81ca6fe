//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the workflow runtime from specific I/O
//! implementations. Each front end implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::{future::Future, ops::Add, time::Duration};

use sealpost_core::{ClipboardError, FetchError, FileError, Language};

use crate::{Workflow, WorkflowEvent};

/// Response to the well-known key resource fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResource {
    /// HTTP-style status code.
    pub status: u16,
    /// Body as text.
    pub body: String,
}

/// Abstracts I/O operations for the workflow runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures the
/// same orchestration code runs in the console front end and in simulation.
///
/// Service failures (fetch, file read, clipboard) are returned as their own
/// error types and turned into workflow events by the runtime. Only
/// [`Driver::Error`] aborts the loop.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in simulation.
    type Instant: Copy + Ord + Send + Sync + Add<Duration, Output = Self::Instant>;

    /// Reported language preference of the platform.
    fn language(&self) -> Language;

    /// Poll for the next input event.
    ///
    /// Returns an available event or `None` if no events are ready.
    fn poll_event(
        &mut self,
        workflow: &Workflow,
    ) -> impl Future<Output = Result<Option<WorkflowEvent>, Self::Error>> + Send;

    /// Fetch a resource relative to the page origin.
    ///
    /// # Errors
    ///
    /// Returns an error only for network-level failures. HTTP error statuses
    /// are a successful [`KeyResource`].
    fn fetch_key_resource(
        &mut self,
        path: &str,
    ) -> impl Future<Output = Result<KeyResource, FetchError>> + Send;

    /// Read a user-selected file as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not text.
    fn read_text_file(&mut self, path: &str) -> impl Future<Output = Result<String, FileError>> + Send;

    /// Write text to the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no clipboard or the write fails.
    fn write_clipboard(
        &mut self,
        text: &str,
    ) -> impl Future<Output = Result<(), ClipboardError>> + Send;

    /// Move focus to the plaintext input.
    fn focus_input(&mut self);

    /// Current time instant.
    fn now(&self) -> Self::Instant;

    /// Render the workflow state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, workflow: &Workflow) -> Result<(), Self::Error>;

    /// Stop and clean up resources.
    fn stop(&mut self);
}
