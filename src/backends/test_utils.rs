//! Mock segmenters for testing the background removal plumbing
//!
//! These implement [`Segmenter`] without a model file or ONNX Runtime, so the
//! read → segment → decode → encode path can be verified deterministically.

use crate::{
    error::{ProcessingError, Result},
    segmentation::Segmenter,
    services::ImageIOService,
};
use image::{DynamicImage, Rgba, RgbaImage};
use std::sync::{Arc, Mutex};

/// Returns the same encoded image for every input and records call sizes
#[derive(Debug, Clone)]
pub struct FixedOutputSegmenter {
    output: Vec<u8>,
    call_history: Arc<Mutex<Vec<usize>>>,
}

impl FixedOutputSegmenter {
    /// Stub that always answers with `image` encoded as PNG
    #[must_use]
    pub fn new(image: &DynamicImage) -> Self {
        Self::with_bytes(ImageIOService::encode_png(image).unwrap())
    }

    /// Stub that answers with raw bytes, valid image or not
    #[must_use]
    pub fn with_bytes(output: Vec<u8>) -> Self {
        Self {
            output,
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A 4x4 cutout: opaque red left half, transparent right half
    #[must_use]
    pub fn checkerboard_cutout() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        }))
    }

    /// Input lengths seen so far, in call order
    pub fn get_call_history(&self) -> Vec<usize> {
        self.call_history.lock().unwrap().clone()
    }
}

impl Segmenter for FixedOutputSegmenter {
    fn segment(&self, input: &[u8]) -> Result<Vec<u8>> {
        if let Ok(mut history) = self.call_history.lock() {
            history.push(input.len());
        }
        Ok(self.output.clone())
    }

    fn name(&self) -> &str {
        "fixed-output stub"
    }
}

/// Always fails, simulating a model that cannot run
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingSegmenter;

impl Segmenter for FailingSegmenter {
    fn segment(&self, _input: &[u8]) -> Result<Vec<u8>> {
        Err(ProcessingError::segmentation("mock segmentation failure"))
    }
}
