//! Subcommand implementations.
//!
//! Each function writes its report to the given writer so the binary can pass
//! stdout and tests can pass a buffer.

use std::{io::Write, path::PathBuf};

use sealpost_app::{Runtime, WorkflowEvent};
use sealpost_cache::{CacheProxy, Manifest, storage::RedbCache, version_token_now};
use sealpost_core::{IntegrityDigest, Language, PgpCapability, sri};
use tokio::io::AsyncReadExt;

use crate::{CliError, ConsoleDriver, Origin, Upstream};

/// Where the plaintext comes from.
#[derive(Debug, Clone)]
pub enum MessageSource {
    /// Given inline.
    Text(String),
    /// Read from a file, as if dropped onto the input.
    File(PathBuf),
    /// Read from standard input.
    Stdin,
}

/// Options of `sealpost encrypt`.
#[derive(Debug, Clone)]
pub struct EncryptOptions {
    /// Site origin serving `public.asc`.
    pub origin: String,
    /// Key file to load by hand after the auto-load attempt.
    pub key_file: Option<PathBuf>,
    /// Pinned SHA-256 of the auto-loaded key, base64 with optional `sha256-` prefix.
    pub integrity: Option<String>,
    /// Plaintext source.
    pub message: MessageSource,
    /// Output language.
    pub language: Language,
    /// Offline cache to fall back to.
    pub cache: Option<PathBuf>,
    /// File receiving the copied ciphertext.
    pub copy_to: Option<PathBuf>,
}

/// Run the encryption workflow once.
///
/// # Errors
///
/// Returns [`CliError::NotEncrypted`] with the last notice when the session
/// ended without ciphertext.
pub async fn encrypt<C, W>(options: EncryptOptions, capability: C, out: W) -> Result<(), CliError>
where
    C: PgpCapability,
    W: Write + Send,
{
    let origin = Origin::parse(&options.origin)?;
    let upstream = match &options.cache {
        Some(path) => Upstream::Cached(CacheProxy::new(
            origin,
            RedbCache::open(path)?,
            Manifest::new(version_token_now()),
        )),
        None => Upstream::Direct(origin),
    };

    let mut script = Vec::new();
    if let Some(path) = &options.key_file {
        script.push(WorkflowEvent::KeyFileChosen { path: path.display().to_string() });
    }
    script.push(match options.message {
        MessageSource::Text(text) => WorkflowEvent::InputChanged(text),
        MessageSource::File(path) => WorkflowEvent::FileDropped { path: path.display().to_string() },
        MessageSource::Stdin => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            WorkflowEvent::InputChanged(text)
        },
    });
    script.push(WorkflowEvent::EncryptRequested);
    if options.copy_to.is_some() {
        script.push(WorkflowEvent::CopyRequested);
    }

    let mut driver = ConsoleDriver::new(upstream, out, options.language, script);
    if let Some(path) = options.copy_to {
        driver = driver.with_clipboard_file(path);
    }

    let pinned = options.integrity.as_deref().and_then(IntegrityDigest::new);
    if pinned.is_none() {
        tracing::warn!("no integrity digest pinned, auto-loaded key is trusted as served");
    }

    let mut runtime = Runtime::new(driver, capability, pinned);
    runtime.run().await?;

    let workflow = runtime.workflow();
    if workflow.ciphertext().is_some() {
        return Ok(());
    }
    let reason = workflow
        .notice()
        .map_or_else(|| "no plaintext to encrypt".to_string(), |notice| notice.message.clone());
    Err(CliError::NotEncrypted(reason))
}

/// Print the subresource-integrity digest of each file.
///
/// # Errors
///
/// Fails on the first unreadable file.
pub fn digest<W: Write>(files: &[PathBuf], mut out: W) -> Result<(), CliError> {
    for file in files {
        let content = std::fs::read(file)?;
        writeln!(out, "{}  {}", sri(&content), file.display())?;
    }
    Ok(())
}

/// Options of `sealpost precache`.
#[derive(Debug, Clone)]
pub struct PrecacheOptions {
    /// Site origin to fetch assets from.
    pub origin: String,
    /// Cache database path.
    pub cache: PathBuf,
    /// Manifest JSON file. The default asset list when absent.
    pub manifest: Option<PathBuf>,
    /// Version token, overriding the manifest's.
    pub version: Option<String>,
}

/// Install the manifest's assets into the cache and drop older caches.
///
/// # Errors
///
/// Fails if the manifest is invalid, any asset cannot be fetched, or the
/// cache database fails. Nothing is stored on a failed install.
pub async fn precache<W: Write>(options: PrecacheOptions, mut out: W) -> Result<(), CliError> {
    let mut manifest = match &options.manifest {
        Some(path) => Manifest::from_json(&tokio::fs::read_to_string(path).await?)?,
        None => Manifest::new(version_token_now()),
    };
    if let Some(version) = options.version {
        manifest.version = version;
    }

    let proxy = CacheProxy::new(Origin::parse(&options.origin)?, RedbCache::open(&options.cache)?, manifest);
    let stored = proxy.install().await?;
    let deleted = proxy.activate()?;

    writeln!(out, "{}: {stored} entries", proxy.cache_name())?;
    for name in deleted {
        writeln!(out, "deleted {name}")?;
    }
    Ok(())
}

/// Versioned cache name for a build. A fresh timestamp token when `version`
/// is absent.
pub fn cache_name(version: Option<String>) -> String {
    Manifest::new(version.unwrap_or_else(version_token_now)).cache_name()
}

