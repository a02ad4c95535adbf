//! HTTP rendering of mock replies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mockway_core::mocks::MockReply;

use crate::error::{ErrorBody, FIXTURE_ERROR};

/// A [`MockReply`] ready to be sent.
pub struct MockResponse(pub MockReply);

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        match self.0 {
            MockReply::Preflight => StatusCode::OK.into_response(),
            MockReply::Fixture { status, body } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(body)).into_response()
            }
            MockReply::FixtureUnavailable { error, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(FIXTURE_ERROR, error.to_string())),
            )
                .into_response(),
        }
    }
}
