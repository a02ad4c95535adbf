//! Read-only fixture storage.
//!
//! Fixtures are looked up by name on every request and never cached, so a
//! fixture edited on disk is served on the next request.

use std::future::Future;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Fixture lookup or decoding failure
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture does not exist in the store
    #[error("Fixture '{name}' not found")]
    NotFound { name: String },
    /// Fixture name escapes the store
    #[error("Fixture name '{name}' is not a relative path inside the fixture store")]
    InvalidName { name: String },
    /// Fixture exists but could not be read
    #[error("Failed to read fixture '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
    /// Fixture content is not valid JSON
    #[error("Fixture '{name}' is not valid JSON: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Capability to read a fixture document by name.
pub trait FixtureStore: Send + Sync {
    fn read(&self, name: &str) -> impl Future<Output = Result<Vec<u8>, FixtureError>> + Send;
}

/// Fixture store backed by a directory of files.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, FixtureError> {
        let relative = Path::new(name);
        let is_plain = !name.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if !is_plain {
            return Err(FixtureError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl FixtureStore for DirectoryStore {
    fn read(&self, name: &str) -> impl Future<Output = Result<Vec<u8>, FixtureError>> + Send {
        let resolved = self.resolve(name);
        let name = name.to_string();
        async move {
            let path = resolved?;
            tokio::fs::read(&path).await.map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => FixtureError::NotFound { name },
                _ => FixtureError::Io { name, source },
            })
        }
    }
}
