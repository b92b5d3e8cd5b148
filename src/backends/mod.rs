//! Segmentation backend implementations
//!
//! - ONNX Runtime backend (U²-Net / `ISNet` models, feature `onnx`)
//! - [`UnavailableSegmenter`] for builds without a model runtime

use crate::error::{ProcessingError, Result};
use crate::segmentation::Segmenter;

#[cfg(feature = "onnx")]
pub mod onnx;

// Test utilities for backend testing
#[cfg(test)]
pub mod test_utils;

#[cfg(feature = "onnx")]
pub use self::onnx::OnnxSegmenter;

/// Segmenter used when the crate is built without a model runtime
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSegmenter;

impl Segmenter for UnavailableSegmenter {
    fn segment(&self, _input: &[u8]) -> Result<Vec<u8>> {
        Err(ProcessingError::model(
            "no segmentation backend available; rebuild with the `onnx` feature",
        ))
    }

    fn name(&self) -> &str {
        "unavailable backend"
    }
}
