//! Barnlog Storage Library
//!
//! Durable photo storage. The [`PhotoStore`] trait is the seam the HTTP layer depends on;
//! [`LocalPhotoStore`] writes each photo as a single file under a confined root directory.
//!
//! # File layout
//!
//! Every stored photo is `{root}/{photo_id}`, where `photo_id` is 32 lowercase hex
//! characters generated by the backend. Names are never supplied by callers.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::PhotoId;
pub use local::{ConfinedRoot, LocalPhotoStore};
pub use traits::{PhotoStore, SavedPhoto, StorageError, StorageResult};
