//! Result types shared by the processing operations

use std::path::PathBuf;

/// A processed image that was written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// Where the image was written
    pub path: PathBuf,
    /// Size of the written file in bytes
    pub size_bytes: u64,
}

impl SavedImage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
        }
    }

    /// File size in kilobytes (1 KB = 1024 bytes)
    #[must_use]
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}
