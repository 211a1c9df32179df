//! Oversized request handling.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::web::error::ApiError;

/// Give every 413 response the JSON error body.
///
/// Extractors that hit the body limit on their own answer with a plain-text
/// 413; those responses are replaced so clients always see `{"error": ...}`.
pub async fn json_payload_too_large(
    State(max_upload_size_mb): State<u64>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(req).await;
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }

    ApiError::payload_too_large(max_upload_size_mb).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    async fn plain_too_large() -> (StatusCode, &'static str) {
        (StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded")
    }

    async fn json_too_large() -> ApiError {
        ApiError::payload_too_large(7)
    }

    async fn ok() -> &'static str {
        "OK"
    }

    async fn call(path: &str) -> (StatusCode, Vec<u8>) {
        let app = Router::new()
            .route("/plain", get(plain_too_large))
            .route("/json", get(json_too_large))
            .route("/ok", get(ok))
            .layer(middleware::from_fn_with_state(50u64, json_payload_too_large));

        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_plain_413_becomes_json() {
        let (status, body) = call("/plain").await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "File is too large. Max size is 50MB.");
    }

    #[tokio::test]
    async fn test_json_413_untouched() {
        let (status, body) = call("/json").await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "File is too large. Max size is 7MB.");
    }

    #[tokio::test]
    async fn test_other_responses_untouched() {
        let (status, body) = call("/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }
}
