//! Router configuration for the HTTP API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use super::handlers::{
    delete_file, download_all, download_file, index, list_files, rename_file, upload_file,
    AppState,
};
use super::middleware::{create_cors_layer, json_payload_too_large};
use super::openapi::openapi_json;

/// Create the main API router.
///
/// Every route shares one request body limit taken from the state. A declared
/// `Content-Length` over the limit is refused before any handler runs; bodies
/// without one are cut off once the limit is read.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let max_upload_size_mb = app_state.max_upload_size_mb;
    let body_limit = app_state.max_upload_size_bytes();

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload_file))
        .route("/download_file", get(download_file))
        .route("/list", get(list_files))
        .route("/delete/:filename", delete(delete_file))
        .route("/rename", post(rename_file))
        .route("/download_all", get(download_all))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn_with_state(
                    max_upload_size_mb,
                    json_payload_too_large,
                )),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the router serving the OpenAPI document.
pub fn create_openapi_router() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
