//! OpenAPI document for the HTTP API.
//!
//! Served at `/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

use super::dto::{FileListResponse, MessageResponse, RenameRequest, UploadResponse};
use super::error::{ErrorBody, ErrorCode};

/// Assembled OpenAPI document for the file endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "cloudstore",
        description = "Flat-directory file storage: upload, download, list, delete, rename and bulk zip download."
    ),
    paths(
        crate::web::handlers::file::upload_file,
        crate::web::handlers::file::download_file,
        crate::web::handlers::file::list_files,
        crate::web::handlers::file::delete_file,
        crate::web::handlers::file::rename_file,
        crate::web::handlers::file::download_all,
    ),
    components(schemas(
        UploadResponse,
        FileListResponse,
        MessageResponse,
        RenameRequest,
        ErrorBody,
        ErrorCode,
    )),
    tags(
        (name = "files", description = "Stored file operations")
    )
)]
pub struct ApiDoc;

/// GET /openapi.json - The OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
