//! Cache manifest: which assets to pre-cache and under which versioned name.
//!
//! The cache name embeds a version token, so changing the token at build time
//! invalidates every cache of older builds on the next activation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Request;

/// Cache name prefix used when none is configured.
pub const DEFAULT_CACHE_PREFIX: &str = "sealpost";

/// Assets pre-cached by default, relative to the page origin.
pub const DEFAULT_ASSETS: [&str; 7] = [
    "./",
    "./index.html",
    "./assets/css/style.css",
    "./assets/js/app.js",
    "./assets/js/openpgp.min.js",
    "./public.asc",
    "./assets/manifest.json",
];

/// Manifest loading failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// Not valid manifest JSON.
    #[error("invalid manifest JSON: {0}")]
    Json(String),

    /// A required field is empty.
    #[error("manifest field `{0}` must not be empty")]
    Empty(&'static str),
}

/// Versioned asset list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Cache name prefix.
    #[serde(default = "default_name")]
    pub name: String,
    /// Version token embedded in the cache name.
    pub version: String,
    /// Asset paths relative to the origin.
    #[serde(default = "default_assets")]
    pub assets: Vec<String>,
}

fn default_name() -> String {
    DEFAULT_CACHE_PREFIX.to_string()
}

fn default_assets() -> Vec<String> {
    DEFAULT_ASSETS.iter().map(ToString::to_string).collect()
}

impl Manifest {
    /// Default manifest for `version`.
    pub fn new(version: impl Into<String>) -> Self {
        Self { name: default_name(), version: version.into(), assets: default_assets() }
    }

    /// Parse a manifest from JSON. Missing `name` and `assets` take defaults.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: Self =
            serde_json::from_str(json).map_err(|e| ManifestError::Json(e.to_string()))?;

        if manifest.name.is_empty() {
            return Err(ManifestError::Empty("name"));
        }
        if manifest.version.is_empty() {
            return Err(ManifestError::Empty("version"));
        }
        Ok(manifest)
    }

    /// Name of the cache this manifest installs into.
    pub fn cache_name(&self) -> String {
        format!("{}-v{}", self.name, self.version)
    }

    /// One request per asset, in manifest order.
    pub fn requests(&self) -> Vec<Request> {
        self.assets.iter().map(|asset| Request::get(asset)).collect()
    }
}

/// Version token for a fresh build: local time as `YYYYMMDDhhmmss`.
pub fn version_token_now() -> String {
    chrono::Local::now().format("%Y%m%d%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_name_embeds_version() {
        assert_eq!(Manifest::new("20260105164950").cache_name(), "sealpost-v20260105164950");
    }

    #[test]
    fn json_defaults() {
        let manifest = Manifest::from_json(r#"{"version": "7"}"#).unwrap();
        assert_eq!(manifest.name, "sealpost");
        assert_eq!(manifest.assets.len(), DEFAULT_ASSETS.len());
        assert_eq!(manifest.requests()[0], Request::get("/"));
    }

    #[test]
    fn json_overrides() {
        let manifest =
            Manifest::from_json(r#"{"name": "gpg-online", "version": "1", "assets": ["./a.css"]}"#)
                .unwrap();
        assert_eq!(manifest.cache_name(), "gpg-online-v1");
        assert_eq!(manifest.requests(), vec![Request::get("a.css")]);
    }

    #[test]
    fn json_rejects_empty_version_and_garbage() {
        assert_eq!(Manifest::from_json(r#"{"version": ""}"#), Err(ManifestError::Empty("version")));
        assert!(matches!(Manifest::from_json("not json"), Err(ManifestError::Json(_))));
    }

    #[test]
    fn version_token_shape() {
        let token = version_token_now();
        assert_eq!(token.len(), 14);
        assert!(token.bytes().all(|b| b.is_ascii_digit()));
    }
}
