//! Upload policy constants
//!
//! These are fixed policy values, not runtime configuration. Handlers receive them
//! through [`UploadLimits`] so tests can inject smaller ceilings.

/// Largest decoded photo payload accepted by storage (10 MiB).
pub const MAX_PHOTO_SIZE_BYTES: u64 = 10 << 20;

/// Allowance for multipart framing on top of the payload (1 MiB).
pub const MAX_MULTIPART_OVERHEAD_BYTES: u64 = 1 << 20;

/// Outer ceiling for the whole request body.
pub const MAX_UPLOAD_REQUEST_BYTES: u64 = MAX_PHOTO_SIZE_BYTES + MAX_MULTIPART_OVERHEAD_BYTES;

/// Multipart field that carries the photo.
pub const PHOTO_FIELD_NAME: &str = "photo";

/// Number of leading bytes inspected for the file signature.
pub const SNIFF_LEN: usize = 512;

/// Content types a photo may be classified as.
pub const ALLOWED_PHOTO_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Outer and inner byte ceilings for a photo upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Inner ceiling: decoded payload handed to storage.
    pub max_photo_bytes: u64,
    /// Framing allowance added to the payload to form the outer ceiling.
    pub max_multipart_overhead_bytes: u64,
}

impl UploadLimits {
    pub fn new(max_photo_bytes: u64, max_multipart_overhead_bytes: u64) -> Self {
        Self {
            max_photo_bytes,
            max_multipart_overhead_bytes,
        }
    }

    /// Outer ceiling applied to the request body.
    pub fn max_request_bytes(&self) -> u64 {
        self.max_photo_bytes
            .saturating_add(self.max_multipart_overhead_bytes)
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self::new(MAX_PHOTO_SIZE_BYTES, MAX_MULTIPART_OVERHEAD_BYTES)
    }
}
