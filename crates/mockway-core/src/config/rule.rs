//! Rule file entry.

use crate::config::error::ConfigError;
use crate::types::method::HttpMethod;
use crate::types::rule::MockRule;
use serde::{Deserialize, Serialize};

/// Mock rule as written in a rules file.
///
/// ```yaml
/// - path: /api/v1/user
///   method: POST
///   fixture: user-post.json
///   status: 200
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Exact request path
    pub path: String,
    /// HTTP method, GET when omitted
    #[serde(default)]
    pub method: HttpMethod,
    /// Set to `false` to fall through to the upstream
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Fixture file name
    #[serde(alias = "fixtureFile")]
    pub fixture: String,
    /// Response status, 200 when omitted
    #[serde(default = "default_status", alias = "statusCode")]
    pub status: u16,
}

fn default_enabled() -> bool {
    true
}

fn default_status() -> u16 {
    200
}

impl TryFrom<RuleConfig> for MockRule {
    type Error = ConfigError;

    fn try_from(config: RuleConfig) -> Result<Self, Self::Error> {
        if !config.path.starts_with('/') {
            return Err(ConfigError::InvalidPath(config.path));
        }
        if config.fixture.trim().is_empty() {
            return Err(ConfigError::EmptyFixture {
                method: config.method.to_string(),
                path: config.path,
            });
        }
        if !(100..=599).contains(&config.status) {
            return Err(ConfigError::InvalidStatus {
                method: config.method.to_string(),
                path: config.path,
                status: config.status,
            });
        }

        Ok(MockRule {
            path: config.path,
            method: config.method,
            enabled: config.enabled,
            fixture: config.fixture,
            status: config.status,
        })
    }
}
