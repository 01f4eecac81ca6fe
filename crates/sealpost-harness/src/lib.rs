//! Deterministic simulation harness for sealpost testing.
//!
//! In-memory implementations of the capability, driver and network seams so
//! the production [`sealpost_app::Runtime`] and [`sealpost_cache::CacheProxy`]
//! run unchanged under scripted, reproducible conditions.
//!
//! # Model-Based Testing
//!
//! The `model` module provides arbitrary user operations. Fuzzers and
//! property tests generate sequences of them, replay them through a
//! [`SimDriver`], and let the invariant registry judge every rendered state.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the common
//! workflow invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fake_pgp;
pub mod invariants;
pub mod model;
pub mod sim_driver;
pub mod sim_network;

pub use fake_pgp::{FakeKey, FakePgp};
pub use invariants::{
    BlockedStaysAwaiting, CiphertextMatchesState, ControlsMatchState, EncryptionRequiresKey,
    Invariant, InvariantRegistry, InvariantResult, SystemSnapshot, TransitionValidity, Violation,
    WorkflowSnapshot,
};
pub use model::Operation;
pub use sim_driver::{SimDriver, SimDriverError, Step};
pub use sim_network::{ChaoticNetwork, SimNetwork};
