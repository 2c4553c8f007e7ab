//! Filesystem-level storage for rated snippet images.
//!
//! Uploads are stored in a single flat directory using content-hash naming:
//! `{sha256-hex}_{good|bad}.png`. The filename is fully determined by the
//! uploaded bytes and the rating, so re-uploading the same content with the
//! same rating overwrites the existing file.

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Rating attached to an uploaded snippet image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    /// The snippet was rendered correctly.
    Good,
    /// The snippet was rendered incorrectly.
    Bad,
}

impl Rating {
    /// Build a rating from the boolean form flag.
    pub fn from_flag(good: bool) -> Self {
        if good {
            Self::Good
        } else {
            Self::Bad
        }
    }

    /// Returns the suffix used in filenames for this rating.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Metadata about a stored snippet image.
#[derive(Debug)]
pub struct StoredImage {
    /// Full lowercase hex SHA-256 digest of the raw uploaded bytes.
    pub digest: String,
    /// Filename the image was written under, relative to the base directory.
    pub filename: String,
    /// Width of the decoded image in pixels.
    pub width: u32,
    /// Height of the decoded image in pixels.
    pub height: u32,
    /// Length of the raw upload in bytes.
    pub size_bytes: usize,
}

/// Filesystem manager for rated snippet images.
pub struct ImageStore {
    base_dir: PathBuf,
}

impl ImageStore {
    /// Create a new `ImageStore` with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// The directory uploads are written into.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the base directory if it does not exist yet.
    ///
    /// Called once at startup so request handlers can assume the
    /// directory is present.
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }

    /// Store an uploaded image under its content hash.
    ///
    /// The raw bytes are hashed, decoded to validate they are a real image,
    /// re-encoded as PNG, and written to
    /// `{base_dir}/{digest}_{good|bad}.png` (create-or-overwrite).
    ///
    /// # Returns
    ///
    /// Metadata about the stored image including its content digest and the
    /// raw upload length.
    pub fn store(&self, data: &[u8], rating: Rating) -> Result<StoredImage> {
        let digest = compute_digest(data);

        // Decode to validate the upload; an invalid image fails here
        // before anything touches the disk.
        let img = image::load_from_memory(data)?;

        let filename = format_filename(&digest, rating);
        let path = self.base_dir.join(&filename);

        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)?;
        std::fs::write(&path, buf.into_inner())?;

        Ok(StoredImage {
            digest,
            filename,
            width: img.width(),
            height: img.height(),
            size_bytes: data.len(),
        })
    }

    /// Get the filesystem path an upload with the given digest and rating
    /// is stored under.
    pub fn path_for(&self, digest: &str, rating: Rating) -> PathBuf {
        self.base_dir.join(format_filename(digest, rating))
    }
}

/// Compute the content digest for uploaded data.
///
/// Returns the full lowercase hex SHA-256 digest.
fn compute_digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Format the filename for a stored image.
fn format_filename(digest: &str, rating: Rating) -> String {
    format!("{}_{}.png", digest, rating.suffix())
}
