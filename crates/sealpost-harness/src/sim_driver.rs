//! Simulation driver for deterministic runtime testing.
//!
//! `SimDriver` implements [`Driver`] against a script of user events and an
//! in-memory world: one key resource, a file map, a clipboard, and a virtual
//! clock that only moves when the script says so.
//!
//! Every render snapshots the workflow. With an [`InvariantRegistry`]
//! attached, a violation aborts the run with [`SimDriverError`] at the frame
//! that exhibits it.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use sealpost_app::{Driver, KeyResource, Workflow, WorkflowEvent, WorkflowState};
use sealpost_core::{ClipboardError, FetchError, FileError, KEY_RESOURCE_PATH, Language};

use crate::invariants::{InvariantRegistry, SystemSnapshot, WorkflowSnapshot};

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Deliver a user event.
    Event(WorkflowEvent),
    /// Move the virtual clock forward.
    Advance(Duration),
}

/// Error from the simulation driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriver error: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

struct SharedState {
    script: VecDeque<Step>,
    clock: Duration,
    key_resource: Result<KeyResource, FetchError>,
    fetched_paths: Vec<String>,
    files: HashMap<String, String>,
    clipboard_available: bool,
    clipboard: Option<String>,
    render_count: usize,
    focus_count: usize,
    history: Vec<WorkflowState>,
    last_frame: Option<WorkflowSnapshot>,
    stopped: bool,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            script: VecDeque::new(),
            clock: Duration::ZERO,
            key_resource: Ok(KeyResource { status: 404, body: String::new() }),
            fetched_paths: Vec::new(),
            files: HashMap::new(),
            clipboard_available: true,
            clipboard: None,
            render_count: 0,
            focus_count: 0,
            history: Vec::new(),
            last_frame: None,
            stopped: false,
        }
    }
}

/// Scripted driver with a virtual clock.
///
/// Clones share the same world, so a test can keep a handle for inspection
/// after moving the driver into a [`sealpost_app::Runtime`]. Once the script
/// is exhausted the driver requests quit.
#[derive(Clone)]
pub struct SimDriver {
    shared: Arc<Mutex<SharedState>>,
    language: Language,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a driver whose key resource answers 404.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(SharedState::default())),
            language: Language::En,
            invariants: None,
        }
    }

    /// Render in `language`.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Check `registry` on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    /// Serve `body` with status 200 at the well-known key path.
    pub fn serve_key(&self, body: impl Into<String>) {
        self.serve_key_status(200, body);
    }

    /// Serve the key resource with an explicit status.
    pub fn serve_key_status(&self, status: u16, body: impl Into<String>) {
        self.lock().key_resource = Ok(KeyResource { status, body: body.into() });
    }

    /// Make the key resource fetch fail without a response.
    pub fn fail_key_fetch(&self, error: FetchError) {
        self.lock().key_resource = Err(error);
    }

    /// Make `content` readable at `path`.
    pub fn add_file(&self, path: impl Into<String>, content: impl Into<String>) {
        self.lock().files.insert(path.into(), content.into());
    }

    /// Make clipboard writes fail.
    pub fn disable_clipboard(&self) {
        self.lock().clipboard_available = false;
    }

    /// Append a user event to the script.
    pub fn push(&self, event: WorkflowEvent) {
        self.lock().script.push_back(Step::Event(event));
    }

    /// Append a clock advance to the script.
    pub fn advance(&self, by: Duration) {
        self.lock().script.push_back(Step::Advance(by));
    }

    /// Append `steps` to the script.
    pub fn script(&self, steps: impl IntoIterator<Item = Step>) {
        self.lock().script.extend(steps);
    }

    /// Number of frames rendered.
    pub fn render_count(&self) -> usize {
        self.lock().render_count
    }

    /// Number of focus requests.
    pub fn focus_count(&self) -> usize {
        self.lock().focus_count
    }

    /// Last clipboard content written.
    pub fn clipboard(&self) -> Option<String> {
        self.lock().clipboard.clone()
    }

    /// Key resource paths fetched, in order.
    pub fn fetched_paths(&self) -> Vec<String> {
        self.lock().fetched_paths.clone()
    }

    /// Wizard step of every rendered frame.
    pub fn history(&self) -> Vec<WorkflowState> {
        self.lock().history.clone()
    }

    /// Most recently rendered frame.
    pub fn last_frame(&self) -> Option<WorkflowSnapshot> {
        self.lock().last_frame.clone()
    }

    /// Virtual time elapsed.
    pub fn elapsed(&self) -> Duration {
        self.lock().clock
    }

    /// Whether the runtime has stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        #[allow(clippy::expect_used)]
        self.shared.lock().expect("SimDriver mutex poisoned")
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;
    type Instant = Duration;

    fn language(&self) -> Language {
        self.language
    }

    async fn poll_event(&mut self, _workflow: &Workflow) -> Result<Option<WorkflowEvent>, Self::Error> {
        let mut state = self.lock();
        match state.script.pop_front() {
            Some(Step::Event(event)) => Ok(Some(event)),
            Some(Step::Advance(by)) => {
                state.clock += by;
                Ok(None)
            },
            None => Ok(Some(WorkflowEvent::QuitRequested)),
        }
    }

    async fn fetch_key_resource(&mut self, path: &str) -> Result<KeyResource, FetchError> {
        let mut state = self.lock();
        state.fetched_paths.push(path.to_string());
        if path != KEY_RESOURCE_PATH {
            return Ok(KeyResource { status: 404, body: String::new() });
        }
        state.key_resource.clone()
    }

    async fn read_text_file(&mut self, path: &str) -> Result<String, FileError> {
        self.lock().files.get(path).cloned().ok_or_else(|| FileError::Io(format!("no such file: {path}")))
    }

    async fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self.lock();
        if !state.clipboard_available {
            return Err(ClipboardError::Unsupported);
        }
        state.clipboard = Some(text.to_string());
        Ok(())
    }

    fn focus_input(&mut self) {
        self.lock().focus_count += 1;
    }

    fn now(&self) -> Duration {
        self.lock().clock
    }

    fn render(&mut self, workflow: &Workflow) -> Result<(), Self::Error> {
        let frame = WorkflowSnapshot::from_workflow(workflow);
        let snapshot = {
            let mut state = self.lock();
            state.render_count += 1;
            state.history.push(frame.state);
            state.last_frame = Some(frame.clone());
            SystemSnapshot::with_history(frame, state.history.clone())
        };

        if let Some(registry) = &self.invariants
            && let Err(violations) = registry.check_all(&snapshot)
        {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            return Err(SimDriverError(format!("invariant violation: {}", messages.join("; "))));
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}
