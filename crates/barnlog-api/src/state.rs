//! Application state shared by all handlers.

use barnlog_core::UploadLimits;
use barnlog_processing::PhotoValidator;
use barnlog_storage::PhotoStore;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub photo_store: Arc<dyn PhotoStore>,
    pub validator: PhotoValidator,
    /// Outer (request) and inner (payload) byte ceilings for uploads.
    pub limits: UploadLimits,
    /// Deadline for a single upload request, observed by storage after the write.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(photo_store: Arc<dyn PhotoStore>, request_timeout: Duration) -> Self {
        Self {
            photo_store,
            validator: PhotoValidator::default(),
            limits: UploadLimits::default(),
            request_timeout,
        }
    }

    pub fn with_limits(mut self, limits: UploadLimits) -> Self {
        self.limits = limits;
        self
    }
}
