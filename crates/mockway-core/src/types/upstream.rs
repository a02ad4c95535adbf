//! The single upstream origin non-mocked traffic is forwarded to.

use std::fmt;
use std::str::FromStr;
use url::Url;

/// Upstream target parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("Invalid upstream URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Upstream URL '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("Upstream URL '{0}' has no host")]
    MissingHost(String),
    #[error("Upstream URL '{0}' must not carry a query or fragment")]
    UnexpectedSuffix(String),
    #[error("Upstream URL '{0}' must not carry a path")]
    UnexpectedPath(String),
    #[error("Path '{path}' would be forwarded as '{forwarded}'")]
    RewrittenPath { path: String, forwarded: String },
}

/// Base URL (scheme + host, optional port) of the real backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    base: Url,
}

impl UpstreamTarget {
    pub fn parse(input: &str) -> Result<Self, UpstreamError> {
        let base = Url::parse(input).map_err(|e| UpstreamError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(UpstreamError::UnsupportedScheme(input.to_string()));
        }
        if base.host_str().is_none() {
            return Err(UpstreamError::MissingHost(input.to_string()));
        }
        if base.query().is_some() || base.fragment().is_some() {
            return Err(UpstreamError::UnexpectedSuffix(input.to_string()));
        }
        if base.path() != "/" {
            return Err(UpstreamError::UnexpectedPath(input.to_string()));
        }

        Ok(Self { base })
    }

    /// Build the forward URL for a request path and optional query.
    ///
    /// Only path and query of the base are replaced, so a request path such as
    /// `//elsewhere.example/x` stays on the upstream host. URL parsing drops
    /// `.` and `..` segments and escapes some bytes; a path that would not
    /// survive byte for byte is refused.
    pub fn url_for(&self, path: &str, query: Option<&str>) -> Result<Url, UpstreamError> {
        let mut url = self.base.clone();
        url.set_path(path);
        if url.path() != path {
            return Err(UpstreamError::RewrittenPath {
                path: path.to_string(),
                forwarded: url.path().to_string(),
            });
        }
        url.set_query(query);
        Ok(url)
    }
}

impl FromStr for UpstreamTarget {
    type Err = UpstreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.base.as_str();
        f.write_str(rendered.strip_suffix('/').unwrap_or(rendered))
    }
}
