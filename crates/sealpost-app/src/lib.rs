//! Application layer for sealpost
//!
//! Pure state machine and generic runtime for the load-key, compose, encrypt
//! workflow. The same orchestration code runs behind the console front end and
//! inside deterministic simulation.
//!
//! # Components
//!
//! - [`Workflow`]: workflow state machine (key acquisition, compose, encrypt)
//! - [`Bridge`]: capability bridge (integrity check, key parsing, encryption)
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic orchestration loop using Driver
//! - [`markup`]: localization of static page elements

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod bridge;
mod driver;
mod event;
pub mod markup;
mod runtime;
mod state;
mod workflow;

pub use action::{COPY_FEEDBACK_DURATION, WorkflowAction};
pub use bridge::Bridge;
pub use driver::{Driver, KeyResource};
pub use event::WorkflowEvent;
pub use runtime::Runtime;
pub use state::{FileTarget, KeySource, Notice, NoticeKind, WorkflowState};
pub use workflow::Workflow;
