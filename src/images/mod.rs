//! Rated snippet image storage.
//!
//! Persists uploaded snippet images on disk under filenames that encode
//! the content hash and the rating.

mod storage;

pub use storage::{ImageStore, Rating, StoredImage};
