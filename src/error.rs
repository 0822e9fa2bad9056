//! Error types for the sweep library.
//!
//! The binary wraps these in [`anyhow::Error`]; library code returns
//! [`Result`] so callers can tell a fatal registry failure apart from a
//! per-version engine failure.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SweepError>;

#[derive(Debug, Error)]
pub enum SweepError {
    /// The registry metadata could not be fetched.
    #[error("failed to fetch versions from {url}: {source}")]
    Registry {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The scan engine failed for one version.
    #[error("engine '{engine}' failed for version {version}: {message}")]
    Engine {
        engine: String,
        version: String,
        message: String,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid artifact coordinate '{0}': expected group:artifact[:version]")]
    InvalidCoordinate(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SweepError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SweepError::Io {
            path: path.into(),
            source,
        }
    }
}
