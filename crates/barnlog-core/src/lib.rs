//! Barnlog Core Library
//!
//! Configuration, upload policy constants and the error classification shared by the
//! Barnlog crates.

pub mod config;
pub mod constants;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use constants::UploadLimits;
pub use error::{AppError, ErrorMetadata, LogLevel};
