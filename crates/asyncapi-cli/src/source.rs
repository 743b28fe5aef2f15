//! Input sources
//!
//! The CLI accepts either a local path or an `http(s)` URL. Anything that
//! parses as a URL with both a scheme and a host is fetched; everything else
//! is read from disk.

use reqwest::Url;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading the input document
#[derive(Debug, Error)]
pub enum SourceError {
    /// Local file missing
    #[error("file does not exist: {}", .0.display())]
    FileDoesNotExist(PathBuf),

    /// Local file present but unreadable
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Remote fetch failed or returned an error status
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        /// URL being fetched
        url: Url,
        /// Underlying HTTP error
        #[source]
        source: reqwest::Error,
    },
}

/// Where the input document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Local file
    File(PathBuf),
    /// Remote document
    Url(Url),
}

impl InputSource {
    /// Classify a command-line path argument
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if !url.scheme().is_empty() && url.has_host() => Self::Url(url),
            _ => Self::File(PathBuf::from(raw)),
        }
    }

    /// Whether the source is fetched over the network
    #[inline]
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    /// Read the whole document
    ///
    /// # Errors
    /// - `FileDoesNotExist` if a local path is missing
    /// - `Read` if a local file cannot be read
    /// - `Fetch` if the request fails or the server answers with an error status
    pub async fn read(&self) -> Result<Vec<u8>, SourceError> {
        match self {
            Self::File(path) => {
                if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                    return Err(SourceError::FileDoesNotExist(path.clone()));
                }
                tokio::fs::read(path).await.map_err(|source| SourceError::Read {
                    path: path.clone(),
                    source,
                })
            }
            Self::Url(url) => {
                let fetch = |source: reqwest::Error| SourceError::Fetch {
                    url: url.clone(),
                    source,
                };
                let response = reqwest::get(url.clone())
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(fetch)?;
                let body = response.bytes().await.map_err(fetch)?;
                tracing::debug!(url = %url, bytes = body.len(), "fetched input document");
                Ok(body.to_vec())
            }
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}
