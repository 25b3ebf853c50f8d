//! Storage setup and initialization

use anyhow::{Context, Result};
use barnlog_core::Config;
use barnlog_storage::{LocalPhotoStore, PhotoStore};
use std::sync::Arc;

/// Open the local photo store at the configured directory, creating it if needed.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn PhotoStore>> {
    tracing::info!(
        dir = %config.photo_store_dir().display(),
        "Initializing photo storage..."
    );

    let store = LocalPhotoStore::new(config.photo_store_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to open photo store at {}",
                config.photo_store_dir().display()
            )
        })?;

    Ok(Arc::new(store))
}
