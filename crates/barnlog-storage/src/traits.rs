//! Storage abstraction trait
//!
//! This module defines the `PhotoStore` trait that storage backends implement.

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;

use crate::keys::PhotoId;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("Upload cancelled after write")]
    Cancelled,

    #[error("Random source failure: {0}")]
    RandomSource(String),

    #[error("Invalid storage name: {0}")]
    InvalidKey(String),

    #[error("Destination already exists: {0}")]
    AlreadyExists(String),

    /// Copying the source into the destination failed. The source error is kept intact so
    /// callers can recognise failures that originate in their own reader.
    #[error("Failed to copy photo stream: {0}")]
    Copy(#[source] std::io::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A photo that has been durably written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPhoto {
    pub photo_id: PhotoId,
    pub size_bytes: u64,
}

/// Photo storage abstraction
///
/// `save` either returns a [`SavedPhoto`] whose file holds exactly `size_bytes` bytes, or
/// fails and leaves nothing behind. The backend picks the identifier.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Write `source` to a new photo, reading at most `max_bytes + 1` bytes from it.
    ///
    /// Fails with [`StorageError::PayloadTooLarge`] if the source holds more than
    /// `max_bytes`, and with [`StorageError::Cancelled`] if `cancel` has fired by the time
    /// the write completes.
    async fn save(
        &self,
        source: &mut (dyn AsyncRead + Unpin + Send),
        max_bytes: u64,
        cancel: &CancellationToken,
    ) -> StorageResult<SavedPhoto>;
}
