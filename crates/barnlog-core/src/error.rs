//! Error types module
//!
//! Every failure of the upload pipeline is classified as an `AppError`. The HTTP layer
//! renders the classification through [`ErrorMetadata`]; the `Display` text is for logs
//! only and never reaches a client.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for limit violations
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code sent to the client (e.g. "photo_too_large")
    fn error_code(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid multipart body: {0}")]
    InvalidMultipart(String),

    #[error("Photo field is missing")]
    PhotoRequired,

    #[error("Photo could not be read: {0}")]
    InvalidPhoto(String),

    #[error("Unsupported photo type: {0}")]
    UnsupportedPhotoType(String),

    #[error("Photo too large: {0}")]
    PhotoTooLarge(String),

    #[error("Random source failure: {0}")]
    RandomSourceFailure(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{:#}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::InvalidMultipart(_) => (400, "invalid_multipart", LogLevel::Debug),
        AppError::PhotoRequired => (400, "photo_required", LogLevel::Debug),
        AppError::InvalidPhoto(_) => (400, "invalid_photo", LogLevel::Debug),
        AppError::UnsupportedPhotoType(_) => (400, "unsupported_photo_type", LogLevel::Debug),
        AppError::PhotoTooLarge(_) => (413, "photo_too_large", LogLevel::Warn),
        AppError::NotFound(_) => (404, "not_found", LogLevel::Warn),
        // Entropy failures are fatal to the request and look like any other fault to clients.
        AppError::RandomSourceFailure(_) => (500, "internal_error", LogLevel::Error),
        AppError::Internal(_) => (500, "internal_error", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}

impl AppError {
    /// Variant name for structured logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidMultipart(_) => "InvalidMultipart",
            AppError::PhotoRequired => "PhotoRequired",
            AppError::InvalidPhoto(_) => "InvalidPhoto",
            AppError::UnsupportedPhotoType(_) => "UnsupportedPhotoType",
            AppError::PhotoTooLarge(_) => "PhotoTooLarge",
            AppError::RandomSourceFailure(_) => "RandomSourceFailure",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        for err in [
            AppError::InvalidMultipart("boundary".into()),
            AppError::PhotoRequired,
            AppError::InvalidPhoto("empty".into()),
            AppError::UnsupportedPhotoType("text/plain".into()),
        ] {
            assert_eq!(err.http_status_code(), 400);
            assert_eq!(err.log_level(), LogLevel::Debug);
        }
    }

    #[test]
    fn too_large_maps_to_413() {
        let err = AppError::PhotoTooLarge("storage ceiling".into());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.error_code(), "photo_too_large");
    }

    #[test]
    fn random_source_failure_is_opaque() {
        let err = AppError::RandomSourceFailure("getrandom failed".into());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "internal_error");
        assert_eq!(err.error_type(), "RandomSourceFailure");
    }

    #[test]
    fn anyhow_error_becomes_internal() {
        let err: AppError = anyhow::anyhow!("denied").context("binding listener").into();
        assert!(matches!(err, AppError::Internal(ref msg) if msg.contains("denied")));
        assert_eq!(err.error_code(), "internal_error");
    }
}
