//! File handlers for the HTTP API.

use axum::{
    body::{Body, Bytes},
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, Path, Query, State,
    },
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::file::ARCHIVE_NAME;
use crate::web::dto::{
    DownloadQuery, FileListResponse, MessageResponse, RenameRequest, UploadResponse,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::CloudStoreError;

/// Content-Disposition value that makes the client save the body as `filename`.
///
/// Stored names are sanitized, so they never need quoting or escaping.
fn attachment_header(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", filename)
}

/// Build a binary attachment response.
fn attachment_response(
    filename: &str,
    content_type: &str,
    content: Vec<u8>,
) -> Result<Response<Body>, ApiError> {
    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, attachment_header(filename))
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

/// Map a multipart read failure, keeping oversized bodies distinguishable.
fn multipart_error(e: MultipartError, max_upload_size_mb: u64) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Upload rejected: body exceeds {}MB", max_upload_size_mb);
        ApiError::payload_too_large(max_upload_size_mb)
    } else {
        tracing::warn!("Failed to read multipart data: {}", e);
        ApiError::bad_request("Invalid multipart data")
    }
}

/// POST /upload - Upload a file.
///
/// Expects a multipart form whose `file` part carries the content and the
/// client-side file name. A same-named stored file is replaced.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "files",
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing file, empty name or disallowed extension", body = crate::web::error::ErrorBody),
        (status = 413, description = "Request body too large", body = crate::web::error::ErrorBody),
        (status = 500, description = "Write failed", body = crate::web::error::ErrorBody)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!("Upload without multipart body: {}", e);
        ApiError::bad_request("No file part")
    })?;

    let mut upload: Option<(String, Bytes)> = None;

    // The whole body is read, so trailing parts still count against the limit.
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, state.max_upload_size_mb))?
    {
        // A part without a filename is a plain form value, not a file.
        let filename = match (field.name(), field.file_name()) {
            (Some("file"), Some(filename)) if upload.is_none() => filename.to_string(),
            _ => continue,
        };

        let content = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, state.max_upload_size_mb))?;
        upload = Some((filename, content));
    }

    let (filename, content) = upload.ok_or_else(|| ApiError::bad_request("No file part"))?;

    let stored_name = state
        .service()
        .upload(&filename, &content)
        .map_err(|e| match e {
            CloudStoreError::Validation(_) => ApiError::bad_request("No selected file"),
            CloudStoreError::InvalidName(_) => ApiError::bad_request("Invalid file name"),
            CloudStoreError::DisallowedExtension(_) => {
                ApiError::bad_request("File type not allowed")
            }
            e => {
                tracing::error!("Error uploading file: {}", e);
                ApiError::internal("File upload failed")
            }
        })?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        filename: stored_name,
    }))
}

/// GET /download_file?filename=X - Download one file as an attachment.
#[utoipa::path(
    get,
    path = "/download_file",
    tag = "files",
    params(DownloadQuery),
    responses(
        (status = 200, description = "File content as an attachment"),
        (status = 400, description = "No filename provided", body = crate::web::error::ErrorBody),
        (status = 404, description = "File not found", body = crate::web::error::ErrorBody),
        (status = 500, description = "Read failed", body = crate::web::error::ErrorBody)
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response<Body>, ApiError> {
    let filename = query
        .filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ApiError::bad_request("No filename provided"))?;

    let (name, content) = state.service().download(&filename).map_err(|e| match e {
        CloudStoreError::NotFound(_) => {
            tracing::warn!("File not found: {}", filename);
            ApiError::not_found("File not found")
        }
        e => {
            tracing::error!("Error downloading file: {}", e);
            ApiError::internal("Download failed")
        }
    })?;

    let content_type = mime_guess::from_path(&name)
        .first_or_octet_stream()
        .to_string();

    attachment_response(&name, &content_type, content)
}

/// GET /list - List stored file names.
#[utoipa::path(
    get,
    path = "/list",
    tag = "files",
    responses(
        (status = 200, description = "Stored file names", body = FileListResponse),
        (status = 500, description = "Listing failed", body = crate::web::error::ErrorBody)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FileListResponse>, ApiError> {
    let files = state.service().list().map_err(|e| {
        tracing::error!("Error listing files: {}", e);
        ApiError::internal("Failed to retrieve file list")
    })?;

    Ok(Json(FileListResponse { files }))
}

/// DELETE /delete/:filename - Delete a file.
#[utoipa::path(
    delete,
    path = "/delete/{filename}",
    tag = "files",
    params(
        ("filename" = String, Path, description = "Name of the file to delete")
    ),
    responses(
        (status = 200, description = "File deleted", body = MessageResponse),
        (status = 404, description = "File not found", body = crate::web::error::ErrorBody),
        (status = 500, description = "Removal failed", body = crate::web::error::ErrorBody)
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.service().delete(&filename).map_err(|e| match e {
        CloudStoreError::NotFound(_) => {
            tracing::warn!("File not found: {}", filename);
            ApiError::not_found("File not found")
        }
        e => {
            tracing::error!("Error deleting file: {}", e);
            ApiError::internal("File deletion failed")
        }
    })?;

    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// POST /rename - Rename a file without overwriting.
#[utoipa::path(
    post,
    path = "/rename",
    tag = "files",
    request_body = RenameRequest,
    responses(
        (status = 200, description = "File renamed", body = MessageResponse),
        (status = 400, description = "Missing names or disallowed extension", body = crate::web::error::ErrorBody),
        (status = 404, description = "Original file does not exist", body = crate::web::error::ErrorBody),
        (status = 409, description = "Target name already exists", body = crate::web::error::ErrorBody),
        (status = 500, description = "Rename failed", body = crate::web::error::ErrorBody)
    )
)]
pub async fn rename_file(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RenameRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large(state.max_upload_size_mb)
        } else {
            ApiError::bad_request(format!("Invalid JSON: {}", e.body_text()))
        }
    })?;

    let old_name = req.old_name.unwrap_or_default();
    let new_name = req.new_name.unwrap_or_default();

    state
        .service()
        .rename(&old_name, &new_name)
        .map_err(|e| match e {
            CloudStoreError::Validation(_) => {
                ApiError::bad_request("Both old_name and new_name are required.")
            }
            CloudStoreError::InvalidName(_) => ApiError::bad_request("Invalid file name."),
            CloudStoreError::DisallowedExtension(_) => {
                ApiError::bad_request("New file name has disallowed extension.")
            }
            CloudStoreError::NotFound(_) => ApiError::not_found("Original file does not exist."),
            CloudStoreError::AlreadyExists(_) => {
                ApiError::conflict("A file with the new name already exists.")
            }
            e => {
                tracing::error!("Error renaming file: {}", e);
                ApiError::internal("File rename failed.")
            }
        })?;

    Ok(Json(MessageResponse::new("File renamed successfully.")))
}

/// GET /download_all - Download every file as one zip archive.
#[utoipa::path(
    get,
    path = "/download_all",
    tag = "files",
    responses(
        (status = 200, description = "Zip archive `all_files.zip` as an attachment"),
        (status = 404, description = "No files to download", body = crate::web::error::ErrorBody),
        (status = 500, description = "Archive build failed", body = crate::web::error::ErrorBody)
    )
)]
pub async fn download_all(State(state): State<Arc<AppState>>) -> Result<Response<Body>, ApiError> {
    let build_state = state.clone();
    let archive = tokio::task::spawn_blocking(move || build_state.service().download_all())
        .await
        .map_err(|e| {
            tracing::error!("Archive task failed: {}", e);
            ApiError::internal("Failed to create ZIP archive.")
        })?
        .map_err(|e| match e {
            CloudStoreError::EmptyStore => ApiError::not_found("No files to download."),
            e => {
                tracing::error!("Error creating ZIP: {}", e);
                ApiError::internal("Failed to create ZIP archive.")
            }
        })?;

    attachment_response(ARCHIVE_NAME, "application/zip", archive)
}
