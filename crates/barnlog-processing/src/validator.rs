use barnlog_core::constants::{ALLOWED_PHOTO_CONTENT_TYPES, SNIFF_LEN};

/// Classification given to content with no recognised signature.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Photo content validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty photo")]
    EmptyPhoto,

    #[error("Unsupported content type: {content_type} (allowed: {allowed:?})")]
    UnsupportedType {
        content_type: String,
        allowed: Vec<String>,
    },
}

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Classify content by its file signature.
///
/// At most [`SNIFF_LEN`] leading bytes are inspected. Unknown signatures classify as
/// [`OCTET_STREAM`]. Photo types are only reported when their complete signature is
/// present, so text that merely starts like an image is not mistaken for one.
pub fn sniff_content_type(prefix: &[u8]) -> &'static str {
    let window = &prefix[..prefix.len().min(SNIFF_LEN)];

    let mime = match infer::get(window).map(|kind| kind.mime_type()) {
        // Animated PNG shares the PNG signature.
        Some("image/apng") => "image/png",
        Some(mime) => mime,
        None => return OCTET_STREAM,
    };

    if has_full_signature(mime, window) {
        mime
    } else {
        OCTET_STREAM
    }
}

/// `infer` matches photo types on shorter prefixes than their real signatures.
fn has_full_signature(mime: &str, window: &[u8]) -> bool {
    match mime {
        "image/png" => window.starts_with(PNG_SIGNATURE),
        "image/jpeg" => window.starts_with(JPEG_SIGNATURE),
        "image/gif" => window.starts_with(b"GIF87a") || window.starts_with(b"GIF89a"),
        "image/webp" => {
            window.len() >= 14 && window.starts_with(b"RIFF") && &window[8..14] == b"WEBPVP"
        }
        _ => true,
    }
}

/// Content type accepted for a photo, derived from its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentTypeVerdict(&'static str);

impl ContentTypeVerdict {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ContentTypeVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Photo content validator
///
/// Decides whether a sniffed prefix belongs to one of the accepted photo types.
#[derive(Debug, Clone)]
pub struct PhotoValidator {
    allowed_content_types: Vec<String>,
}

impl PhotoValidator {
    pub fn new(allowed_content_types: Vec<String>) -> Self {
        Self {
            allowed_content_types,
        }
    }

    /// Classify `prefix` and return the accepted content type.
    pub fn validate_prefix(&self, prefix: &[u8]) -> Result<ContentTypeVerdict, ValidationError> {
        if prefix.is_empty() {
            return Err(ValidationError::EmptyPhoto);
        }

        let content_type = sniff_content_type(prefix);
        if !self.is_allowed(content_type) {
            tracing::debug!(
                content_type = content_type,
                prefix_len = prefix.len(),
                "Photo signature not accepted"
            );
            return Err(ValidationError::UnsupportedType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(ContentTypeVerdict(content_type))
    }

    pub fn is_allowed(&self, content_type: &str) -> bool {
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed == content_type)
    }
}

impl Default for PhotoValidator {
    fn default() -> Self {
        Self::new(
            ALLOWED_PHOTO_CONTENT_TYPES
                .iter()
                .map(|ct| ct.to_string())
                .collect(),
        )
    }
}
