//! Fuzz target for the encryption workflow
//!
//! Drives the production runtime with arbitrary user operation sequences.
//!
//! # Strategy
//!
//! - Key availability: auto-load served, served with a wrong pin, or absent
//! - Operations: typing, drops, key picks, encrypt/reset/copy, clock advances
//! - Capability faults: encryption failing on demand
//!
//! # Invariants
//!
//! - Every rendered frame passes the standard invariant registry
//! - Encryption is never attempted more often than requested
//! - A wrong pin never reaches the key parser
//! - NEVER panic inside the workflow

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sealpost_app::Runtime;
use sealpost_core::{sha256_base64, IntegrityDigest};
use sealpost_harness::{FakePgp, InvariantRegistry, Operation, SimDriver};

#[derive(Debug, Clone, Arbitrary)]
enum KeySetup {
    Pinned,
    WrongPin,
    Unpinned,
    Absent,
}

#[derive(Debug, Clone, Arbitrary)]
struct Scenario {
    setup: KeySetup,
    fail_encrypt: bool,
    operations: Vec<Operation>,
}

fuzz_target!(|scenario: Scenario| {
    let driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
    let pgp = FakePgp::new();
    pgp.set_fail_encrypt(scenario.fail_encrypt);
    Operation::seed_world(&driver);

    let key = FakePgp::armor("Erin <erin@example.com>");
    let pinned = match scenario.setup {
        KeySetup::Pinned => IntegrityDigest::new(sha256_base64(&key)),
        KeySetup::WrongPin => IntegrityDigest::new(sha256_base64("not the key")),
        KeySetup::Unpinned | KeySetup::Absent => None,
    };
    if !matches!(scenario.setup, KeySetup::Absent) {
        driver.serve_key(key);
    }
    driver.script(scenario.operations.iter().map(Operation::to_step));

    let mut runtime = Runtime::new(driver.clone(), pgp.clone(), pinned);
    if let Err(e) = futures::executor::block_on(runtime.run()) {
        panic!("runtime failed: {e}");
    }

    let requested = scenario.operations.iter().filter(|op| **op == Operation::Encrypt).count();
    assert!(pgp.encrypt_calls() <= requested);

    if matches!(scenario.setup, KeySetup::WrongPin) {
        let picks = scenario.operations.iter().filter(|op| matches!(op, Operation::PickKey(_))).count();
        assert!(pgp.parse_calls() <= picks, "wrong pin reached the parser");
    }
});
