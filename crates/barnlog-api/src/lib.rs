//! Barnlog API Library
//!
//! HTTP surface for photo uploads: handlers, middleware, and application setup.

mod handlers;
mod middleware;
mod telemetry;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use handlers::photo_upload::PhotoUploadResponse;
pub use state::AppState;
