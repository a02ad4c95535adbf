//! Mock routing decision.
//!
//! [`MockRouter::route`] is the first stage of the request pipeline: it either
//! claims a request and produces the reply to send, or hands it on to the
//! proxy with [`RouteOutcome::Unhandled`].

use crate::fixtures::{FixtureError, FixtureStore};
use crate::mocks::table::MockTable;
use crate::types::method::HttpMethod;
use crate::types::rule::MockRule;
use serde_json::Value;
use std::sync::Arc;

/// Request attributes the router looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockRequest<'a> {
    /// Request method, `None` when outside the supported set
    pub method: Option<HttpMethod>,
    /// Request path without the query string
    pub path: &'a str,
}

impl<'a> MockRequest<'a> {
    /// Build from a raw method token; unknown methods never match a rule.
    pub fn new(method: &str, path: &'a str) -> Self {
        Self {
            method: method.parse().ok(),
            path,
        }
    }
}

/// Reply for a request claimed by the router.
#[derive(Debug)]
pub enum MockReply {
    /// CORS preflight on a mocked path: 200 with an empty body
    Preflight,
    /// Fixture served with the rule's status
    Fixture { status: u16, body: Value },
    /// Fixture could not be read or parsed; served as a 500
    FixtureUnavailable { rule: MockRule, error: FixtureError },
}

impl MockReply {
    /// Status code the reply is served with.
    pub fn status(&self) -> u16 {
        match self {
            MockReply::Preflight => 200,
            MockReply::Fixture { status, .. } => *status,
            MockReply::FixtureUnavailable { .. } => 500,
        }
    }
}

/// Outcome of the mock stage.
#[derive(Debug)]
pub enum RouteOutcome {
    Handled(MockReply),
    Unhandled,
}

/// Routes requests against an immutable [`MockTable`].
#[derive(Debug, Clone)]
pub struct MockRouter<S> {
    table: Arc<MockTable>,
    store: S,
}

impl<S: FixtureStore> MockRouter<S> {
    pub fn new(table: impl Into<Arc<MockTable>>, store: S) -> Self {
        Self {
            table: table.into(),
            store,
        }
    }

    pub fn table(&self) -> &MockTable {
        &self.table
    }

    /// Decide whether the request is served from a fixture.
    ///
    /// `OPTIONS` is claimed when any enabled rule exists for the path, whatever
    /// its method. Every other method needs an enabled rule with the same
    /// method and path.
    pub async fn route(&self, request: &MockRequest<'_>) -> RouteOutcome {
        let Some(method) = request.method else {
            return RouteOutcome::Unhandled;
        };

        if method == HttpMethod::Options {
            return if self.table.has_path(request.path) {
                RouteOutcome::Handled(MockReply::Preflight)
            } else {
                RouteOutcome::Unhandled
            };
        }

        let Some(rule) = self.table.find(method, request.path) else {
            return RouteOutcome::Unhandled;
        };

        let reply = match self.load_fixture(&rule.fixture).await {
            Ok(body) => MockReply::Fixture {
                status: rule.status,
                body,
            },
            Err(error) => MockReply::FixtureUnavailable {
                rule: rule.clone(),
                error,
            },
        };
        RouteOutcome::Handled(reply)
    }

    async fn load_fixture(&self, name: &str) -> Result<Value, FixtureError> {
        let bytes = self.store.read(name).await?;
        serde_json::from_slice(&bytes).map_err(|source| FixtureError::Malformed {
            name: name.to_string(),
            source,
        })
    }
}
