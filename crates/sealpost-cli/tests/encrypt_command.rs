//! End-to-end tests of `sealpost encrypt` against a directory origin.
//!
//! The production runtime and console driver run unchanged; only the OpenPGP
//! capability is the deterministic fake.

use std::path::Path;

use sealpost_cli::{
    CliError,
    commands::{self, EncryptOptions, MessageSource},
};
use sealpost_core::{Language, sri};
use sealpost_harness::FakePgp;
use tempfile::{TempDir, tempdir};

const DANA: &str = "Dana <dana@example.com>";

fn site_with_key(user_id: &str) -> TempDir {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("public.asc"), FakePgp::armor(user_id)).unwrap();
    dir
}

fn options(origin: &Path, message: MessageSource) -> EncryptOptions {
    EncryptOptions {
        origin: origin.to_str().unwrap().to_string(),
        key_file: None,
        integrity: None,
        message,
        language: Language::En,
        cache: None,
        copy_to: None,
    }
}

async fn run(options: EncryptOptions) -> (Result<(), CliError>, String) {
    let mut out = Vec::new();
    let result = commands::encrypt(options, FakePgp::new(), &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn pinned_key_encrypts_and_links_mail() {
    let site = site_with_key(DANA);
    let key = std::fs::read(site.path().join("public.asc")).unwrap();
    let mut opts = options(site.path(), MessageSource::Text("hello".into()));
    opts.integrity = Some(sri(&key));

    let (result, out) = run(opts).await;

    result.unwrap();
    assert!(out.contains("[Recipient Public Key]\nUser ID: Dana <dana@example.com>\n"), "{out}");
    assert!(out.contains("[Encryption Complete]\n-----BEGIN FAKE MESSAGE-----"), "{out}");
    assert!(
        out.contains("Send via Email: mailto:dana@example.com?subject=Encrypted%20Message&body="),
        "{out}"
    );
}

#[tokio::test]
async fn integrity_mismatch_stops_before_encrypting() {
    let site = site_with_key(DANA);
    let mut opts = options(site.path(), MessageSource::Text("hello".into()));
    opts.integrity = Some(sri(b"a different key"));

    let (result, out) = run(opts).await;

    let Err(CliError::NotEncrypted(reason)) = result else {
        panic!("expected NotEncrypted, got {result:?}");
    };
    assert_eq!(reason, "Security Warning: Public key file integrity check failed!");
    assert!(out.contains("error: Security Warning"), "{out}");
    assert!(!out.contains("User ID:"), "{out}");
}

#[tokio::test]
async fn missing_key_falls_back_to_key_file() {
    let site = tempdir().unwrap();
    let key_file = site.path().join("elsewhere.asc");
    std::fs::write(&key_file, FakePgp::armor(DANA)).unwrap();
    let mut opts = options(site.path(), MessageSource::Text("hello".into()));
    opts.key_file = Some(key_file);

    let (result, out) = run(opts).await;

    result.unwrap();
    assert!(out.starts_with("warning: Unable to Auto-load Public Key\n"), "{out}");
    assert!(out.contains("Full Fingerprint: "), "{out}");
}

#[tokio::test]
async fn missing_key_without_file_fails() {
    let site = tempdir().unwrap();
    let (result, _) = run(options(site.path(), MessageSource::Text("hello".into()))).await;

    assert!(matches!(result, Err(CliError::NotEncrypted(reason)) if reason == "Unable to Auto-load Public Key"));
}

#[tokio::test]
async fn message_file_and_clipboard_file() {
    let site = site_with_key(DANA);
    let note = site.path().join("note.txt");
    let copy = site.path().join("note.asc");
    std::fs::write(&note, "from a file\n").unwrap();
    let mut opts = options(site.path(), MessageSource::File(note));
    opts.copy_to = Some(copy.clone());

    let (result, out) = run(opts).await;

    result.unwrap();
    assert!(out.ends_with("Copied\n"), "{out}");
    let copied = std::fs::read_to_string(copy).unwrap();
    let (_, plaintext) = FakePgp::open(&copied).unwrap();
    assert_eq!(plaintext, "from a file");
}

#[tokio::test]
async fn blank_message_is_not_encrypted() {
    let site = site_with_key(DANA);
    let (result, _) = run(options(site.path(), MessageSource::Text("   ".into()))).await;

    assert!(matches!(result, Err(CliError::NotEncrypted(reason)) if reason == "no plaintext to encrypt"));
}

#[tokio::test]
async fn chinese_output() {
    let site = site_with_key(DANA);
    let mut opts = options(site.path(), MessageSource::Text("你好".into()));
    opts.language = Language::detect(Some("zh_CN.UTF-8"));

    let (result, out) = run(opts).await;

    result.unwrap();
    assert!(out.contains("用户信息: Dana <dana@example.com>"), "{out}");
    assert!(out.contains("[接收者公钥]\n"), "{out}");
    assert!(!out.contains("User ID:"), "{out}");
    assert!(out.contains("mailto:dana@example.com"), "{out}");
}
