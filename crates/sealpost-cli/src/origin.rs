//! Asset origins.
//!
//! An origin is either an HTTP(S) base URL or a directory laid out like the
//! deployed site. Both answer missing assets with a 404 response rather than
//! an error, matching what the page sees from a web server.

use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
    time::Duration,
};

use sealpost_cache::{CacheProxy, Network, NetworkError, Request, Response, storage::RedbCache};

use crate::CliError;

/// Where site assets are fetched from.
#[derive(Debug, Clone)]
pub enum Origin {
    /// Remote site. `base` always ends with `/`.
    Http {
        /// Shared HTTP client.
        client: reqwest::Client,
        /// Base URL assets are resolved against.
        base: String,
    },
    /// Local directory standing in for the site root.
    Dir(PathBuf),
}

impl Origin {
    /// Parse an `--origin` argument.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidOrigin`] if `arg` is not an http(s) URL and
    /// not an existing directory.
    pub fn parse(arg: &str) -> Result<Self, CliError> {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            let base = if arg.ends_with('/') { arg.to_string() } else { format!("{arg}/") };
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .map_err(|e| CliError::InvalidOrigin(e.to_string()))?;
            return Ok(Self::Http { client, base });
        }

        let dir = PathBuf::from(arg);
        if !dir.is_dir() {
            return Err(CliError::InvalidOrigin(format!(
                "{arg} is neither an http(s) URL nor a directory"
            )));
        }
        Ok(Self::Dir(dir))
    }

    /// Location `request` resolves to, for logging.
    pub fn locate(&self, request: &Request) -> String {
        match self {
            Self::Http { base, .. } => format!("{base}{}", request.path()),
            Self::Dir(root) => root.join(site_relative(request)).display().to_string(),
        }
    }
}

/// Site root maps to its index page.
fn site_relative(request: &Request) -> &str {
    if request.path().is_empty() { "index.html" } else { request.path() }
}

fn resolve_in(root: &Path, request: &Request) -> Result<PathBuf, NetworkError> {
    let relative = Path::new(site_relative(request));
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(NetworkError::InvalidUrl(request.path().to_string()));
    }
    Ok(root.join(relative))
}

impl Network for Origin {
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        match self {
            Self::Http { client, base } => {
                let url = format!("{base}{}", request.path());
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| NetworkError::Unreachable(e.to_string()))?;

                let status = response.status().as_u16();
                let body =
                    response.bytes().await.map_err(|e| NetworkError::Unreachable(e.to_string()))?;
                Ok(Response { status, body: body.to_vec() })
            },
            Self::Dir(root) => {
                let path = resolve_in(root, request)?;
                match tokio::fs::read(&path).await {
                    Ok(body) => Ok(Response::ok(body)),
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        Ok(Response { status: 404, body: Vec::new() })
                    },
                    Err(e) => Err(NetworkError::Unreachable(e.to_string())),
                }
            },
        }
    }
}

/// Origin as seen by the console session: direct, or through the offline
/// cache when `--cache` is given.
pub enum Upstream {
    /// Straight to the origin.
    Direct(Origin),
    /// Network first, cached copy when the origin cannot be reached.
    Cached(CacheProxy<Origin, RedbCache>),
}

impl Upstream {
    /// Fetch `request`, flattening every failure to a message.
    ///
    /// # Errors
    ///
    /// Returns the display form of the network or proxy error.
    pub async fn fetch(&self, request: &Request) -> Result<Response, String> {
        match self {
            Self::Direct(origin) => origin.fetch(request).await.map_err(|e| e.to_string()),
            Self::Cached(proxy) => proxy.fetch(request).await.map_err(|e| e.to_string()),
        }
    }

    fn origin(&self) -> &Origin {
        match self {
            Self::Direct(origin) => origin,
            Self::Cached(proxy) => proxy.network(),
        }
    }

    /// Location `request` resolves to, for logging.
    pub fn locate(&self, request: &Request) -> String {
        self.origin().locate(request)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn http_base_gets_trailing_slash() {
        let Origin::Http { base, .. } = Origin::parse("https://example.com/site").unwrap() else {
            panic!("expected http origin");
        };
        assert_eq!(base, "https://example.com/site/");
    }

    #[test]
    fn missing_directory_is_rejected() {
        let err = Origin::parse("/definitely/not/here").unwrap_err();
        assert!(matches!(err, CliError::InvalidOrigin(_)));
    }

    #[tokio::test]
    async fn directory_serves_files_and_404s() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>").unwrap();
        let origin = Origin::parse(dir.path().to_str().unwrap()).unwrap();

        let root = origin.fetch(&Request::get("./")).await.unwrap();
        assert_eq!(root.body, b"<html>");

        let missing = origin.fetch(&Request::get("./public.asc")).await.unwrap();
        assert_eq!(missing.status, 404);
    }

    #[tokio::test]
    async fn traversal_is_refused() {
        let dir = tempdir().unwrap();
        let origin = Origin::parse(dir.path().to_str().unwrap()).unwrap();

        let err = origin.fetch(&Request::get("../secret")).await.unwrap_err();
        assert!(matches!(err, NetworkError::InvalidUrl(_)));
    }
}
