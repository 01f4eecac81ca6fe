//! Generic runtime for workflow orchestration.
//!
//! The Runtime drives the workflow event loop, coordinating between:
//! - [`Workflow`]: page state machine
//! - [`Bridge`]: OpenPGP capability bridge
//! - [`Driver`]: Platform-specific I/O

use sealpost_core::{IntegrityDigest, PgpCapability};

use crate::{Bridge, Driver, FileTarget, Workflow, WorkflowAction, WorkflowEvent};

/// Event to deliver once its due time has passed.
struct Timer<I> {
    due: I,
    event: WorkflowEvent,
}

/// Generic runtime that orchestrates Workflow, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `C`: OpenPGP capability
pub struct Runtime<D, C>
where
    D: Driver,
    C: PgpCapability,
{
    driver: D,
    workflow: Workflow,
    bridge: Bridge<C>,
    timers: Vec<Timer<D::Instant>>,
}

impl<D, C> Runtime<D, C>
where
    D: Driver,
    C: PgpCapability,
{
    /// Create a new runtime. The workflow language comes from the driver.
    pub fn new(driver: D, capability: C, pinned: Option<IntegrityDigest>) -> Self {
        let workflow = Workflow::new(driver.language());
        let bridge = Bridge::new(capability, pinned);
        Self { driver, workflow, bridge, timers: Vec::new() }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Reports a missing capability, then starts the workflow
    /// 2. Delivers timers that have come due
    /// 3. Polls for input events from the driver
    /// 4. Processes actions and events between Workflow, Bridge and Driver
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error. Service
    /// failures never abort the loop.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        if self.start().await? {
            self.driver.stop();
            return Ok(());
        }

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Returns `true` if the application should quit.
    async fn start(&mut self) -> Result<bool, D::Error> {
        self.driver.render(&self.workflow)?;

        if let Err(e) = self.bridge.ready() {
            tracing::error!(error = %e, "OpenPGP capability unavailable");
            if self.dispatch(WorkflowEvent::CapabilityUnavailable).await? {
                return Ok(true);
            }
        }

        self.dispatch(WorkflowEvent::Started).await
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        for event in self.take_due_timers() {
            if self.dispatch(event).await? {
                return Ok(true);
            }
        }

        match self.driver.poll_event(&self.workflow).await? {
            Some(event) => self.dispatch(event).await,
            None => Ok(false),
        }
    }

    /// Feed one event to the workflow and execute the resulting actions.
    ///
    /// Returns `true` if should quit.
    async fn dispatch(&mut self, event: WorkflowEvent) -> Result<bool, D::Error> {
        let actions = self.workflow.handle(event);
        self.process_actions(actions).await
    }

    /// Process actions returned by the Workflow.
    ///
    /// Events produced while executing an action are fed straight back into
    /// the workflow; their actions run in the next round.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(
        &mut self,
        initial_actions: Vec<WorkflowAction>,
    ) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                let events = match action {
                    WorkflowAction::Render => {
                        self.driver.render(&self.workflow)?;
                        continue;
                    },
                    WorkflowAction::Quit => return Ok(true),
                    WorkflowAction::FocusInput => {
                        self.driver.focus_input();
                        continue;
                    },
                    WorkflowAction::ScheduleCopyRevert { generation, after } => {
                        let due = self.driver.now() + after;
                        self.timers.push(Timer {
                            due,
                            event: WorkflowEvent::CopyFeedbackElapsed { generation },
                        });
                        continue;
                    },
                    WorkflowAction::FetchKeyResource { path } => {
                        match self.driver.fetch_key_resource(&path).await {
                            Ok(resource) => vec![WorkflowEvent::KeyResourceFetched {
                                status: resource.status,
                                body: resource.body,
                            }],
                            Err(e) => {
                                tracing::warn!(%path, error = %e, "key resource fetch failed");
                                vec![WorkflowEvent::KeyResourceUnavailable { reason: e.to_string() }]
                            },
                        }
                    },
                    WorkflowAction::ReadKeyFile { path } => {
                        self.read_file(&path, FileTarget::KeyFile).await
                    },
                    WorkflowAction::ReadDroppedFile { path } => {
                        self.read_file(&path, FileTarget::Plaintext).await
                    },
                    WorkflowAction::WriteClipboard { text } => {
                        match self.driver.write_clipboard(&text).await {
                            Ok(()) => vec![WorkflowEvent::CopySucceeded],
                            Err(e) => {
                                tracing::warn!(error = %e, "clipboard write failed");
                                vec![WorkflowEvent::CopyFailed]
                            },
                        }
                    },

                    // Key verification and encryption go through the bridge
                    WorkflowAction::VerifyKey { .. } | WorkflowAction::Encrypt { .. } => {
                        self.bridge.process_action(action)
                    },
                };

                for event in events {
                    let new_actions = self.workflow.handle(event);
                    pending_actions.extend(new_actions);
                }
            }
        }
        Ok(false)
    }

    async fn read_file(&mut self, path: &str, target: FileTarget) -> Vec<WorkflowEvent> {
        match (self.driver.read_text_file(path).await, target) {
            (Ok(content), FileTarget::KeyFile) => vec![WorkflowEvent::KeyFileRead { content }],
            (Ok(content), FileTarget::Plaintext) => vec![WorkflowEvent::DroppedFileRead { content }],
            (Err(e), target) => {
                vec![WorkflowEvent::FileReadFailed { target, reason: e.to_string() }]
            },
        }
    }

    fn take_due_timers(&mut self) -> Vec<WorkflowEvent> {
        let now = self.driver.now();
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.timers).into_iter().partition(|timer| timer.due <= now);
        self.timers = pending;
        due.into_iter().map(|timer| timer.event).collect()
    }

    /// Whether copy-revert timers are still waiting.
    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Get a reference to the Workflow
    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// Get a reference to the Bridge
    pub fn bridge(&self) -> &Bridge<C> {
        &self.bridge
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the Driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
