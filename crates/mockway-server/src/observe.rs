//! Diagnostic events emitted by the request pipeline.
//!
//! Routing and forwarding code does not log; the pipeline reports what
//! happened at each stage through [`record`].

use std::time::Duration;

use axum::http::{Method, StatusCode, Uri};
use mockway_core::mocks::MockReply;
use reqwest::Url;

use crate::proxy::ProxyError;

/// Something that happened while handling one request.
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    /// Request accepted, before routing
    Incoming { method: &'a Method, uri: &'a Uri },
    /// Request answered by the mock stage
    Mocked {
        method: &'a Method,
        path: &'a str,
        reply: &'a MockReply,
    },
    /// Request sent to the upstream
    ProxyDispatched { method: &'a Method, target: &'a Url },
    /// Upstream response head received
    ProxyCompleted {
        method: &'a Method,
        target: &'a Url,
        status: StatusCode,
        elapsed: Duration,
    },
    /// Forward could not be completed; a 500 is returned instead
    ProxyFailed {
        method: &'a Method,
        uri: &'a Uri,
        error: &'a ProxyError,
    },
    /// Upstream body broke off after the status was relayed
    ProxyStreamFailed {
        target: &'a Url,
        error: &'a reqwest::Error,
    },
}

/// Emit `event` as one log line.
pub fn record(event: &PipelineEvent<'_>) {
    match event {
        PipelineEvent::Incoming { method, uri } => {
            tracing::info!(%method, %uri, "incoming request");
        }
        PipelineEvent::Mocked {
            method,
            path,
            reply: MockReply::FixtureUnavailable { rule, error },
        } => {
            tracing::error!(
                %method,
                path,
                fixture = %rule.fixture,
                error = %error,
                "failed to serve mock fixture"
            );
        }
        PipelineEvent::Mocked {
            method,
            path,
            reply,
        } => {
            tracing::info!(%method, path, status = reply.status(), "served from mock");
        }
        PipelineEvent::ProxyDispatched { method, target } => {
            tracing::info!(%method, %target, "proxying request");
        }
        PipelineEvent::ProxyCompleted {
            method,
            target,
            status,
            elapsed,
        } => {
            tracing::info!(
                %method,
                %target,
                status = status.as_u16(),
                elapsed_ms = elapsed.as_millis() as u64,
                "proxied request completed"
            );
        }
        PipelineEvent::ProxyFailed { method, uri, error } => {
            tracing::error!(
                %method,
                %uri,
                timeout = error.is_timeout(),
                error = %error,
                "proxy error"
            );
        }
        PipelineEvent::ProxyStreamFailed { target, error } => {
            tracing::warn!(%target, error = %error, "upstream body stream aborted");
        }
    }
}
