//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Every error renders as `{"error": "<code>"}`
//! with the status from [`ErrorMetadata`]; the detailed message is only logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use barnlog_core::{AppError, ErrorMetadata, LogLevel};
use barnlog_processing::ValidationError;
use barnlog_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "photo_too_large")
    pub error: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from barnlog-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}

/// Classify a storage failure. Only the size ceiling and entropy failures are distinguished.
pub fn app_error_from_storage(err: StorageError) -> AppError {
    match err {
        StorageError::PayloadTooLarge { limit } => {
            AppError::PhotoTooLarge(format!("photo exceeds {} bytes", limit))
        }
        StorageError::RandomSource(msg) => AppError::RandomSourceFailure(msg),
        other => AppError::Internal(format!("Storage failure: {}", other)),
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(app_error_from_storage(err))
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::EmptyPhoto => AppError::InvalidPhoto("photo is empty".to_string()),
            ValidationError::UnsupportedType { content_type, .. } => {
                AppError::UnsupportedPhotoType(content_type)
            }
        };
        HttpAppError(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_payload_too_large() {
        let HttpAppError(app_err) = StorageError::PayloadTooLarge { limit: 10 }.into();
        match app_err {
            AppError::PhotoTooLarge(msg) => assert!(msg.contains("10")),
            _ => panic!("Expected PhotoTooLarge variant"),
        }
    }

    #[test]
    fn test_from_storage_error_random_source() {
        let HttpAppError(app_err) = StorageError::RandomSource("no entropy".to_string()).into();
        assert!(matches!(app_err, AppError::RandomSourceFailure(_)));
        assert_eq!(app_err.error_code(), "internal_error");
    }

    #[test]
    fn test_from_storage_error_cancelled_is_internal() {
        let HttpAppError(app_err) = StorageError::Cancelled.into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[test]
    fn test_from_storage_error_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let HttpAppError(app_err) = StorageError::IoError(io_err).into();
        match app_err {
            AppError::Internal(msg) => assert!(msg.contains("disk full")),
            _ => panic!("Expected Internal variant"),
        }
    }

    #[test]
    fn test_from_validation_error_empty_photo() {
        let HttpAppError(app_err) = ValidationError::EmptyPhoto.into();
        assert_eq!(app_err.error_code(), "invalid_photo");
    }

    #[test]
    fn test_from_validation_error_unsupported_type() {
        let validation_err = ValidationError::UnsupportedType {
            content_type: "text/plain; charset=utf-8".to_string(),
            allowed: vec!["image/png".to_string()],
        };
        let HttpAppError(app_err) = validation_err.into();
        assert_eq!(app_err.error_code(), "unsupported_photo_type");
        assert_eq!(app_err.http_status_code(), 400);
    }

    #[test]
    fn test_error_response_shape() {
        let response = HttpAppError(AppError::Internal("secret path /var/lib".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = serde_json::to_value(ErrorResponse {
            error: "internal_error".to_string(),
        })
        .expect("serialize");
        assert_eq!(json, serde_json::json!({ "error": "internal_error" }));
    }
}
