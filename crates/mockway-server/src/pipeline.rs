//! The request pipeline: CORS annotation, mock routing, proxy fallback.
//!
//! Every request goes through [`handle`], mounted as the router's fallback.
//! The mock stage either answers the request or hands it to the proxy stage;
//! both stages always produce a response.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use mockway_core::fixtures::DirectoryStore;
use mockway_core::mocks::{MockRequest, MockRouter, RouteOutcome};

use crate::cors;
use crate::mock::MockResponse;
use crate::observe::{self, PipelineEvent};
use crate::proxy::{ProxyError, ProxyForwarder};

/// Shared, read-only state of the pipeline.
#[derive(Debug, Clone)]
pub struct AppState {
    pub mocks: Arc<MockRouter<DirectoryStore>>,
    pub proxy: Arc<ProxyForwarder>,
}

impl AppState {
    pub fn new(mocks: MockRouter<DirectoryStore>, proxy: ProxyForwarder) -> Self {
        Self {
            mocks: Arc::new(mocks),
            proxy: Arc::new(proxy),
        }
    }
}

/// Build the application: a catch-all pipeline wrapped in the CORS layers.
pub fn app(state: AppState) -> Router {
    cors::annotate(Router::new().fallback(handle).with_state(state))
}

/// Handle one request end to end.
pub async fn handle(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    observe::record(&PipelineEvent::Incoming {
        method: &method,
        uri: &uri,
    });

    let mock_request = MockRequest::new(method.as_str(), uri.path());
    match state.mocks.route(&mock_request).await {
        RouteOutcome::Handled(reply) => {
            observe::record(&PipelineEvent::Mocked {
                method: &method,
                path: uri.path(),
                reply: &reply,
            });
            MockResponse(reply).into_response()
        }
        RouteOutcome::Unhandled => forward(&state.proxy, request, &method, &uri).await,
    }
}

async fn forward(
    proxy: &ProxyForwarder,
    request: Request,
    method: &Method,
    uri: &Uri,
) -> Response {
    let result = async {
        let prepared = proxy.prepare(request).await?;
        observe::record(&PipelineEvent::ProxyDispatched {
            method,
            target: prepared.target(),
        });

        let forwarded = proxy.dispatch(prepared).await?;
        observe::record(&PipelineEvent::ProxyCompleted {
            method,
            target: &forwarded.target,
            status: forwarded.status,
            elapsed: forwarded.elapsed,
        });
        Ok::<_, ProxyError>(forwarded.response)
    }
    .await;

    result.unwrap_or_else(|error| {
        observe::record(&PipelineEvent::ProxyFailed {
            method,
            uri,
            error: &error,
        });
        error.into_response()
    })
}
