//! Common utilities for the photo upload handler

use std::io;
use std::pin::Pin;
use std::time::Duration;

use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use barnlog_core::constants::{PHOTO_FIELD_NAME, SNIFF_LEN};
use barnlog_core::AppError;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;

/// Byte stream of a single multipart field.
pub type FieldStream<'a> = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + 'a>>;

/// True if the error came from the request body exceeding its size limit.
pub fn is_body_limit_error(err: &io::Error) -> bool {
    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
        .is_some_and(|e| e.status() == StatusCode::PAYLOAD_TOO_LARGE)
}

/// Classify a multipart decoding failure.
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PhotoTooLarge(err.body_text())
    } else {
        AppError::InvalidMultipart(err.body_text())
    }
}

/// The photo is the first file part named `photo`. Plain form values are not files.
pub fn is_photo_field(field: &Field<'_>) -> bool {
    field.name() == Some(PHOTO_FIELD_NAME) && field.file_name().is_some()
}

/// Expose a multipart field as an `AsyncRead`.
///
/// Decoding errors are carried inside the `io::Error` so [`is_body_limit_error`] can
/// still recognise them after they pass through readers and copies.
pub fn field_reader(field: Field<'_>) -> StreamReader<FieldStream<'_>, Bytes> {
    let stream: FieldStream<'_> = Box::pin(field.map_err(io::Error::other));
    StreamReader::new(stream)
}

/// Read up to [`SNIFF_LEN`] leading bytes. A short read at end of stream is not an error.
pub async fn read_sniff_prefix<R>(reader: &mut R) -> Result<Vec<u8>, AppError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    (&mut *reader)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut prefix)
        .await
        .map_err(|e| {
            if is_body_limit_error(&e) {
                AppError::PhotoTooLarge(e.to_string())
            } else {
                AppError::InvalidPhoto(e.to_string())
            }
        })?;
    Ok(prefix)
}

/// Request-scoped deadline: the token is cancelled once `timeout` elapses.
///
/// The timer task is aborted when the deadline is dropped.
pub struct RequestDeadline {
    token: CancellationToken,
    timer: JoinHandle<()>,
}

impl RequestDeadline {
    pub fn start(timeout: Duration) -> Self {
        let token = CancellationToken::new();
        let timer = tokio::spawn({
            let token = token.clone();
            async move {
                tokio::time::sleep(timeout).await;
                tracing::debug!(timeout_ms = timeout.as_millis() as u64, "Request deadline elapsed");
                token.cancel();
            }
        });
        Self { token, timer }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for RequestDeadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}
