//! Forwarding of unmocked requests to the upstream origin.
//!
//! A forward runs in two steps so the pipeline can observe the dispatch:
//! [`ProxyForwarder::prepare`] buffers the body and builds the outgoing
//! request, [`ProxyForwarder::dispatch`] sends it and relays the response.
//! The response body is streamed back as it arrives.

use std::time::{Duration, Instant};

use axum::body::{self, Body};
use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::TryStreamExt;
use mockway_core::types::upstream::{UpstreamError, UpstreamTarget};
use reqwest::redirect::Policy;
use reqwest::Url;
use thiserror::Error;

use crate::error::{describe, ErrorBody, PROXY_ERROR};
use crate::observe::{self, PipelineEvent};

/// Connection-scoped headers that are never forwarded in either direction.
const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Header names a `Connection` header marks as hop-by-hop for this message.
fn connection_tokens(headers: &HeaderMap) -> Vec<HeaderName> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect()
}

/// Copy of `headers` without connection-scoped entries.
fn end_to_end(headers: &HeaderMap) -> HeaderMap {
    let named = connection_tokens(headers);
    let mut kept = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !is_hop_by_hop(name) && !named.contains(name) {
            kept.append(name.clone(), value.clone());
        }
    }
    kept
}

/// Forwarding failure. Always answered with a 500 and an [`ErrorBody`].
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Cannot forward request: {0}")]
    Path(#[source] UpstreamError),
    #[error("Failed to read request body: {0}")]
    RequestBody(#[source] axum::Error),
    #[error("Failed to build request for {target}: {}", describe(source))]
    Request {
        target: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {target} failed: {}", describe(source))]
    Upstream {
        target: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to relay upstream response: {0}")]
    Relay(#[source] axum::http::Error),
}

impl ProxyError {
    fn upstream(target: Url, source: reqwest::Error) -> Self {
        ProxyError::Upstream {
            target,
            source: source.without_url(),
        }
    }

    /// Whether the upstream call ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProxyError::Upstream { source, .. } if source.is_timeout())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(PROXY_ERROR, self.to_string())),
        )
            .into_response()
    }
}

/// Settings for the upstream client.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub upstream: UpstreamTarget,
    /// Bound on the whole upstream call, response head included
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Largest request body buffered for forwarding
    pub max_body_bytes: usize,
}

impl ProxyConfig {
    pub fn new(upstream: UpstreamTarget) -> Self {
        Self {
            upstream,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

/// A request ready to be sent upstream.
#[derive(Debug)]
pub struct Prepared {
    target: Url,
    request: reqwest::Request,
}

impl Prepared {
    pub fn target(&self) -> &Url {
        &self.target
    }
}

/// Upstream response relayed to the caller.
#[derive(Debug)]
pub struct Forwarded {
    pub target: Url,
    pub status: StatusCode,
    /// Time from dispatch until the response head arrived
    pub elapsed: Duration,
    pub response: Response,
}

/// Forwards requests to the single upstream origin.
#[derive(Debug, Clone)]
pub struct ProxyForwarder {
    client: reqwest::Client,
    upstream: UpstreamTarget,
    max_body_bytes: usize,
}

impl ProxyForwarder {
    /// Build the forwarder. Certificates are verified and redirects are
    /// handed back to the caller instead of being followed.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(Policy::none())
            .build()
            .map_err(ProxyError::Client)?;

        Ok(Self {
            client,
            upstream: config.upstream,
            max_body_bytes: config.max_body_bytes,
        })
    }

    pub fn upstream(&self) -> &UpstreamTarget {
        &self.upstream
    }

    /// Buffer the body and build the outgoing request.
    ///
    /// Method, path, query, body and end-to-end headers are kept. `Host` is
    /// dropped so the client sets it from the upstream URL. Paths the URL
    /// parser would rewrite, such as ones with `..` segments, are refused.
    pub async fn prepare(&self, request: Request) -> Result<Prepared, ProxyError> {
        let (parts, incoming) = request.into_parts();
        let target = self
            .upstream
            .url_for(parts.uri.path(), parts.uri.query())
            .map_err(ProxyError::Path)?;

        let payload = body::to_bytes(incoming, self.max_body_bytes)
            .await
            .map_err(ProxyError::RequestBody)?;

        let mut headers = end_to_end(&parts.headers);
        headers.remove(header::HOST);

        let mut builder = self
            .client
            .request(parts.method, target.clone())
            .headers(headers);
        if !payload.is_empty() {
            builder = builder.body(payload);
        }

        let request = builder.build().map_err(|source| ProxyError::Request {
            target: target.clone(),
            source,
        })?;

        Ok(Prepared { target, request })
    }

    /// Send a prepared request and relay the upstream response.
    pub async fn dispatch(&self, prepared: Prepared) -> Result<Forwarded, ProxyError> {
        let Prepared { target, request } = prepared;

        let started = Instant::now();
        let upstream = self
            .client
            .execute(request)
            .await
            .map_err(|source| ProxyError::upstream(target.clone(), source))?;
        let elapsed = started.elapsed();

        let status = upstream.status();
        let response = relay(upstream, target.clone())?;

        Ok(Forwarded {
            target,
            status,
            elapsed,
            response,
        })
    }
}

fn relay(upstream: reqwest::Response, target: Url) -> Result<Response, ProxyError> {
    let mut builder = Response::builder().status(upstream.status());
    if let Some(headers) = builder.headers_mut() {
        *headers = end_to_end(upstream.headers());
    }

    // The status is already on its way once streaming starts; a failure here
    // can only cut the body short.
    let stream = upstream.bytes_stream().inspect_err(move |error| {
        observe::record(&PipelineEvent::ProxyStreamFailed {
            target: &target,
            error,
        })
    });

    builder
        .body(Body::from_stream(stream))
        .map_err(ProxyError::Relay)
}
