//! Sealpost core types.
//!
//! Pure data and policy shared by every other sealpost crate. Nothing in here
//! performs I/O: the workflow controller, the cache proxy and the front ends
//! build on these types and supply the I/O themselves.
//!
//! # Components
//!
//! - [`KeyInfo`]: read-only view of a parsed recipient public key
//! - [`IntegrityDigest`]: pinned SHA-256 digest of the auto-loaded key resource
//! - [`Strings`]: localization tables selected once from a [`Language`]
//! - [`MailtoLink`]: outbound mail composition for the ciphertext
//! - [`PgpCapability`]: the external OpenPGP collaborator (parse, encrypt)

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod capability;
pub mod error;
pub mod i18n;
pub mod integrity;
pub mod key_info;
pub mod mailto;

pub use capability::{ParsedKey, PgpCapability};
pub use error::{CapabilityError, ClipboardError, FetchError, FileError, IntegrityError, KeyLoadError};
pub use i18n::{Language, Msg, Strings};
pub use integrity::{IntegrityDigest, sha256_base64, sri};
pub use key_info::KeyInfo;
pub use mailto::{MAIL_SUBJECT, MailtoLink};

/// Well-known relative path of the auto-loaded recipient key.
pub const KEY_RESOURCE_PATH: &str = "./public.asc";
