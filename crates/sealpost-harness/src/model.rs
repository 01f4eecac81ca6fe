//! Arbitrary user operations for model-based testing.
//!
//! An [`Operation`] is one thing a user can do on the page. Fuzzers and
//! property tests generate sequences of them and replay them through a
//! [`SimDriver`] seeded with [`Operation::seed_world`].

use std::time::Duration;

use arbitrary::Arbitrary;
use sealpost_app::WorkflowEvent;

use crate::{FakePgp, SimDriver, Step};

/// Plaintexts the user may type.
pub const TEXTS: [&str; 5] = ["", "   \n", "Hello, world", "你好，世界", "a=b&c?d #1"];

/// Key files the user may pick. The last one is not present in the world.
pub const KEY_FILES: [&str; 4] = ["alice.asc", "bob.asc", "garbage.asc", "missing.asc"];

/// Files the user may drop. The last one is not present in the world.
pub const DROP_FILES: [&str; 3] = ["note.txt", "blank.txt", "missing.txt"];

/// One user operation.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Replace the plaintext with one of [`TEXTS`].
    Type(u8),
    /// Start dragging over the input.
    DragEnter,
    /// Stop dragging.
    DragLeave,
    /// Drop one of [`DROP_FILES`].
    Drop(u8),
    /// Press encrypt.
    Encrypt,
    /// Press reset.
    Reset,
    /// Press copy.
    Copy,
    /// Toggle the key details panel.
    ToggleDetails,
    /// Pick one of [`KEY_FILES`].
    PickKey(u8),
    /// Let time pass, in 250 ms units.
    Wait(u8),
}

impl Operation {
    /// Populate `driver` with the files operations refer to.
    pub fn seed_world(driver: &SimDriver) {
        driver.add_file(KEY_FILES[0], FakePgp::armor("Alice <alice@example.com>"));
        driver.add_file(KEY_FILES[1], FakePgp::armor("Bob <bob@example.org>"));
        driver.add_file(KEY_FILES[2], "not a key");
        driver.add_file(DROP_FILES[0], "dropped note\nsecond line");
        driver.add_file(DROP_FILES[1], "  ");
    }

    /// Script step for this operation.
    pub fn to_step(&self) -> Step {
        let event = match *self {
            Self::Type(i) => WorkflowEvent::InputChanged(pick(&TEXTS, i).to_string()),
            Self::DragEnter => WorkflowEvent::DragEntered,
            Self::DragLeave => WorkflowEvent::DragLeft,
            Self::Drop(i) => WorkflowEvent::FileDropped { path: pick(&DROP_FILES, i).to_string() },
            Self::Encrypt => WorkflowEvent::EncryptRequested,
            Self::Reset => WorkflowEvent::ResetRequested,
            Self::Copy => WorkflowEvent::CopyRequested,
            Self::ToggleDetails => WorkflowEvent::DetailsToggled,
            Self::PickKey(i) => WorkflowEvent::KeyFileChosen { path: pick(&KEY_FILES, i).to_string() },
            Self::Wait(units) => return Step::Advance(Duration::from_millis(250 * u64::from(units))),
        };
        Step::Event(event)
    }
}

fn pick<'a>(choices: &[&'a str], index: u8) -> &'a str {
    choices[usize::from(index) % choices.len()]
}
