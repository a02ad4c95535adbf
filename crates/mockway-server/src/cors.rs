//! Permissive CORS headers on every response.

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, PATCH, OPTIONS";
pub const ALLOW_HEADERS: &str = "*";

/// Wrap every route of `router`, fallback included, so its responses carry the
/// three CORS headers. Values sent by the upstream for these headers are
/// replaced.
pub fn annotate<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use rstest::rstest;
    use tower::ServiceExt;

    fn assert_cors(headers: &axum::http::HeaderMap) {
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOW_ORIGIN);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
    }

    #[rstest]
    #[case("/ok", StatusCode::OK)]
    #[case("/fails", StatusCode::INTERNAL_SERVER_ERROR)]
    #[case("/nowhere", StatusCode::NOT_FOUND)]
    #[tokio::test]
    async fn test_annotate_sets_headers_on_every_response(
        #[case] path: &str,
        #[case] expected: StatusCode,
    ) {
        let router = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/fails", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .fallback(|| async { StatusCode::NOT_FOUND });
        let app = annotate(router);

        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), expected);
        assert_cors(response.headers());
    }

    #[tokio::test]
    async fn test_annotate_overrides_handler_values() {
        let router = Router::new().route(
            "/",
            get(|| async { ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "https://only.example")], "x") }),
        );
        let app = annotate(router);

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_cors(response.headers());
        assert_eq!(
            response
                .headers()
                .get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .iter()
                .count(),
            1
        );
    }
}
