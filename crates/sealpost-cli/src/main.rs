//! Sealpost command-line binary.
//!
//! # Usage
//!
//! ```bash
//! # Encrypt a message to the key published by a site
//! sealpost encrypt --origin https://example.com/ --integrity sha256-... --message "hi"
//!
//! # Same, against a local checkout, copying the result to a file
//! sealpost encrypt --origin ./site --message-file note.txt --copy-to note.asc
//!
//! # Build helpers
//! sealpost digest site/public.asc
//! sealpost precache --origin ./site --cache cache.redb
//! sealpost cache-name
//! ```

use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use sealpost_cli::commands::{self, EncryptOptions, MessageSource, PrecacheOptions};
use sealpost_core::Language;
use sealpost_crypto::Rpgp;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Client-side OpenPGP message encryption
#[derive(Parser, Debug)]
#[command(name = "sealpost")]
#[command(about = "Encrypt a message to a site's published OpenPGP key")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the recipient key and encrypt one message
    Encrypt(EncryptArgs),

    /// Print `sha256-<base64>` integrity digests
    Digest {
        /// Files to digest
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Fetch every cached asset and drop caches of older builds
    Precache {
        /// Site origin: http(s) base URL or directory
        #[arg(long)]
        origin: String,

        /// Cache database path
        #[arg(long, default_value = "sealpost-cache.redb")]
        cache: PathBuf,

        /// Manifest JSON (name, version, assets)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Version token; defaults to the manifest's or a timestamp
        #[arg(long)]
        version: Option<String>,
    },

    /// Print the versioned cache name for a build
    CacheName {
        /// Version token; defaults to a timestamp
        #[arg(long)]
        version: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct EncryptArgs {
    /// Site origin serving `public.asc`: http(s) base URL or directory
    #[arg(long)]
    origin: String,

    /// Load this key file instead of trusting the auto-loaded one
    #[arg(long)]
    key_file: Option<PathBuf>,

    /// Pinned SHA-256 of `public.asc` (base64, `sha256-` prefix optional)
    #[arg(long)]
    integrity: Option<String>,

    /// Message text; read from stdin when neither this nor --message-file is given
    #[arg(long, conflicts_with = "message_file")]
    message: Option<String>,

    /// Read the message from a file
    #[arg(long)]
    message_file: Option<PathBuf>,

    /// Language tag (`en`, `zh-CN`, ...); defaults to `LANG`
    #[arg(long)]
    lang: Option<String>,

    /// Offline cache to fall back to when the origin is unreachable
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Write the ciphertext to this file as the clipboard
    #[arg(long)]
    copy_to: Option<PathBuf>,
}

impl EncryptArgs {
    fn into_options(self) -> EncryptOptions {
        let message = match (self.message, self.message_file) {
            (Some(text), _) => MessageSource::Text(text),
            (None, Some(path)) => MessageSource::File(path),
            (None, None) => MessageSource::Stdin,
        };
        let env_lang = std::env::var("LANG").ok();

        EncryptOptions {
            origin: self.origin,
            key_file: self.key_file,
            integrity: self.integrity,
            message,
            language: Language::detect(self.lang.as_deref().or(env_lang.as_deref())),
            cache: self.cache,
            copy_to: self.copy_to,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    match args.command {
        Command::Encrypt(encrypt) => {
            commands::encrypt(encrypt.into_options(), Rpgp::new(), io::stdout()).await?;
        },
        Command::Digest { files } => commands::digest(&files, io::stdout().lock())?,
        Command::Precache { origin, cache, manifest, version } => {
            let options = PrecacheOptions { origin, cache, manifest, version };
            commands::precache(options, io::stdout().lock()).await?;
        },
        Command::CacheName { version } => {
            writeln!(io::stdout().lock(), "{}", commands::cache_name(version))?;
        },
    }

    Ok(())
}
