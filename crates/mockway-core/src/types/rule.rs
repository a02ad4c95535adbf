//! Mock rule definition.

use crate::types::method::HttpMethod;
use serde::Serialize;

/// A single mocked route.
///
/// Built from a [`RuleConfig`](crate::config::rule::RuleConfig) once the path,
/// fixture name and status have been validated, so a `MockRule` always holds
/// a servable status code and an absolute path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MockRule {
    /// Exact request path, no wildcards
    pub path: String,
    /// HTTP method the rule answers
    pub method: HttpMethod,
    /// Disabled rules behave as if they were not in the table
    pub enabled: bool,
    /// Fixture identifier looked up in the fixture store
    pub fixture: String,
    /// Status returned verbatim when the rule fires (100-599)
    pub status: u16,
}

impl MockRule {
    /// Whether this rule claims `method path`.
    ///
    /// Path comparison is exact: no trailing-slash or query normalization.
    pub fn matches(&self, method: HttpMethod, path: &str) -> bool {
        self.enabled && self.method == method && self.path == path
    }

    /// Whether this rule makes `path` answer CORS preflight requests.
    pub fn covers_path(&self, path: &str) -> bool {
        self.enabled && self.path == path
    }
}
