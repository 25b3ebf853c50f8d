use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use barnlog_core::AppError;
use barnlog_storage::StorageError;
use serde::Serialize;
use tokio::io::AsyncReadExt;

use crate::error::{app_error_from_storage, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{
    field_reader, is_body_limit_error, is_photo_field, multipart_error, read_sniff_prefix,
    RequestDeadline,
};

#[derive(Debug, Serialize)]
pub struct PhotoUploadResponse {
    pub photo_id: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Upload photo handler
///
/// Streams the `photo` part of a multipart body into storage once its leading bytes have
/// been identified as an accepted image type. Other parts are skipped.
///
/// # Errors
/// - `AppError::InvalidMultipart` - body is not a readable multipart form
/// - `AppError::PhotoRequired` - no file part named `photo`
/// - `AppError::InvalidPhoto` - the photo part is empty or unreadable
/// - `AppError::UnsupportedPhotoType` - the content is not JPEG, PNG, WebP or GIF
/// - `AppError::PhotoTooLarge` - the request or the photo exceeds its size limit
/// - `AppError::Internal` - storage failure
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_photo"))]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<PhotoUploadResponse>), HttpAppError> {
    let deadline = RequestDeadline::start(state.request_timeout);

    let mut multipart =
        multipart.map_err(|rejection| AppError::InvalidMultipart(rejection.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if !is_photo_field(&field) {
            continue;
        }

        let response = store_photo(&state, field, &deadline).await?;
        return Ok((StatusCode::CREATED, Json(response)));
    }

    Err(AppError::PhotoRequired.into())
}

async fn store_photo(
    state: &AppState,
    field: Field<'_>,
    deadline: &RequestDeadline,
) -> Result<PhotoUploadResponse, HttpAppError> {
    let mut reader = field_reader(field);

    let prefix = read_sniff_prefix(&mut reader).await?;
    let verdict = state.validator.validate_prefix(&prefix)?;

    // Storage must see the whole payload, sniffed bytes included.
    let mut source = (&prefix[..]).chain(&mut reader);
    let saved = state
        .photo_store
        .save(&mut source, state.limits.max_photo_bytes, deadline.token())
        .await
        .map_err(|err| match err {
            StorageError::Copy(ref e) if is_body_limit_error(e) => AppError::PhotoTooLarge(
                format!("request body exceeds {} bytes", state.limits.max_request_bytes()),
            ),
            other => app_error_from_storage(other),
        })?;

    tracing::info!(
        photo_id = %saved.photo_id,
        content_type = verdict.as_str(),
        size_bytes = saved.size_bytes,
        "Photo uploaded"
    );

    Ok(PhotoUploadResponse {
        photo_id: saved.photo_id.into_string(),
        content_type: verdict.as_str().to_string(),
        size_bytes: saved.size_bytes,
    })
}
