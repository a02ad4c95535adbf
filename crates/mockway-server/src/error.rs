//! Error types for the mockway server.
//!
//! Startup failures are collected in [`Error`] and returned from `main`.
//! Failures while serving a request never escape the pipeline; they are
//! turned into a 500 response carrying an [`ErrorBody`].

use mockway_core::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::proxy::ProxyError;

/// Error code returned when a mocked fixture cannot be served.
pub const FIXTURE_ERROR: &str = "Failed to read local data";

/// Error code returned when forwarding to the upstream fails.
pub const PROXY_ERROR: &str = "Proxy error";

/// Body of every synthetic error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Short error code
    pub error: String,
    /// Human-readable detail
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
        }
    }
}

/// Startup error for the mockway server.
#[derive(Error, Debug)]
pub enum Error {
    /// Rule files could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// HTTP client could not be built.
    #[error(transparent)]
    Proxy(#[from] ProxyError),
    /// Listener could not be bound or the server stopped with an I/O error.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render an error and its sources as one line, outermost first.
pub(crate) fn describe(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}
