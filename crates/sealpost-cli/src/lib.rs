//! Sealpost console front end.
//!
//! Runs the encryption workflow from a terminal and provides the build-time
//! helpers a deployment needs: subresource-integrity digests for the pinned
//! key, versioned cache names, and pre-populating the offline cache.
//!
//! # Components
//!
//! - [`Origin`]: where assets come from, an HTTP base URL or a local directory
//! - [`ConsoleDriver`]: [`sealpost_app::Driver`] over stdout and a scripted
//!   session built from command-line flags
//! - [`commands`]: one function per subcommand, writer-parameterized so tests
//!   can capture output

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
mod console;
mod error;
mod origin;

pub use console::{ConsoleDriver, ConsoleError};
pub use error::CliError;
pub use origin::{Origin, Upstream};
