//! Barnlog Processing Library
//!
//! Content inspection for uploaded photos. Classification looks only at the leading
//! bytes of the payload; client-supplied filenames and `Content-Type` headers are never
//! consulted.

pub mod validator;

pub use validator::{
    sniff_content_type, ContentTypeVerdict, PhotoValidator, ValidationError, OCTET_STREAM,
};
