// ABOUTME: Defines all error types for the template bundler using thiserror.
// ABOUTME: Fetch and build errors are unified under BundlerError.

use std::path::PathBuf;

/// Top-level error type for the template bundler.
#[derive(Debug, thiserror::Error)]
pub enum BundlerError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),
}

/// Errors from template and bundle fetches.
///
/// Cloneable because one failure is observed by every waiter on a shared placeholder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to load template '{key}': {reason}")]
    TemplateLoad { key: String, reason: String },

    #[error("Template bundle unavailable: {0}")]
    BundleUnavailable(String),

    #[error("Template '{0}' is not part of the bundle")]
    NotBundled(String),

    #[error("Placeholder for '{0}' was dropped before resolution")]
    Abandoned(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err.to_string())
    }
}

/// Errors from the offline bundle build step.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read template {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write bundle {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
