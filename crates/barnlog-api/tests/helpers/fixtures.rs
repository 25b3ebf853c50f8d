//! Test fixtures: minimal image blobs and multipart forms.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};

/// Minimal valid 1x1 PNG bytes (69 bytes).
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// PNG signature followed by `total_len - 8` filler bytes.
pub fn create_png_of_len(total_len: usize) -> Vec<u8> {
    let mut data = create_minimal_png()[..8].to_vec();
    data.resize(total_len.max(8), 0x42);
    data
}

/// Minimal GIF89a header plus a trailer.
pub fn create_minimal_gif() -> Vec<u8> {
    let mut data = b"GIF89a".to_vec();
    data.extend_from_slice(&[0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00]);
    data.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0x3B]);
    data
}

/// Multipart form with a single `photo` file part.
pub fn photo_form(bytes: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "photo",
        Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_type(mime_type.to_string()),
    )
}
