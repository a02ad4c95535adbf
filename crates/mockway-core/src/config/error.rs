//! Error types for rule file parsing and loading.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Unknown file type
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
    /// Rule file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Invalid glob pattern
    #[error("Invalid rules pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Glob matched an entry that could not be inspected
    #[error("Failed to expand rules pattern: {0}")]
    Glob(#[from] glob::GlobError),
    /// Pattern matched nothing
    #[error("No rule files match '{0}'")]
    NoFilesMatched(String),
    /// Rule path is not absolute
    #[error("Rule path must start with '/': {0:?}")]
    InvalidPath(String),
    /// Rule has no fixture name
    #[error("Rule {method} {path} has an empty fixture name")]
    EmptyFixture { method: String, path: String },
    /// Rule status is not a valid HTTP status
    #[error("Rule {method} {path} has invalid status {status} (expected 100-599)")]
    InvalidStatus {
        method: String,
        path: String,
        status: u16,
    },
    /// Error inside a specific rule file
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        ConfigError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
