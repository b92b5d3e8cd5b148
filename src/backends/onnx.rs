//! ONNX Runtime segmentation backend
//!
//! Runs a pretrained U²-Net family model and returns a PNG cutout whose alpha
//! channel is the predicted foreground mask. The session is created on the
//! first call to [`Segmenter::segment`] and reused afterwards, so constructing
//! an [`OnnxSegmenter`] never touches the model file.

use crate::config::SegmenterConfig;
use crate::error::{ProcessingError, Result};
use crate::models::find_model_path;
use crate::segmentation::{apply_mask, image_to_tensor, prediction_to_mask, Segmenter};
use crate::services::ImageIOService;
use image::DynamicImage;
use ndarray::{Array4, Ix4};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use std::sync::Mutex;
use std::time::Instant;

/// Background segmentation through ONNX Runtime
#[derive(Debug)]
pub struct OnnxSegmenter {
    config: SegmenterConfig,
    session: Mutex<Option<Session>>,
    label: String,
}

impl OnnxSegmenter {
    #[must_use]
    pub fn new(config: SegmenterConfig) -> Self {
        let label = format!("{} (ONNX Runtime)", config.model_type);
        Self {
            config,
            session: Mutex::new(None),
            label,
        }
    }

    /// Whether the ONNX session has been created
    pub fn is_initialized(&self) -> bool {
        self.session
            .lock()
            .map(|session| session.is_some())
            .unwrap_or(false)
    }

    fn load_session(&self) -> Result<Session> {
        let model_load_start = Instant::now();
        let model_path = find_model_path(
            self.config.model_path.as_deref(),
            self.config.model_type,
        )?;

        let intra_threads = if self.config.intra_threads > 0 {
            self.config.intra_threads
        } else {
            std::thread::available_parallelism()
                .map(std::num::NonZero::get)
                .unwrap_or(4)
        };

        let session = Session::builder()
            .map_err(|e| ProcessingError::model(format!("Failed to create session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ProcessingError::model(format!("Failed to set optimization level: {e}")))?
            .with_intra_threads(intra_threads)
            .map_err(|e| ProcessingError::model(format!("Failed to set intra threads: {e}")))?
            .commit_from_file(&model_path)
            .map_err(|e| {
                ProcessingError::model(format!(
                    "Failed to load model '{}': {e}",
                    model_path.display()
                ))
            })?;

        log::info!(
            "Loaded {} model from {} in {:.0}ms ({} intra-op threads)",
            self.config.model_type,
            model_path.display(),
            model_load_start.elapsed().as_secs_f64() * 1000.0,
            intra_threads
        );
        Ok(session)
    }

    fn infer(&self, input: Array4<f32>) -> Result<Array4<f32>> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| ProcessingError::segmentation(format!("Session lock poisoned: {e}")))?;

        if guard.is_none() {
            *guard = Some(self.load_session()?);
        }
        let session = guard
            .as_mut()
            .ok_or_else(|| ProcessingError::model("ONNX session not initialized"))?;

        let inference_start = Instant::now();
        let input_value = Value::from_array(input).map_err(|e| {
            ProcessingError::segmentation(format!("Failed to convert input tensor: {e}"))
        })?;

        let outputs = session
            .run(ort::inputs![input_value])
            .map_err(|e| ProcessingError::segmentation(format!("ONNX inference failed: {e}")))?;

        // First output is the finest side output for U²-Net style models
        let keys: Vec<_> = outputs.keys().collect();
        let first_key = keys
            .first()
            .ok_or_else(|| ProcessingError::segmentation("No output tensors found"))?;
        let prediction = outputs
            .get(first_key)
            .ok_or_else(|| ProcessingError::segmentation("First output tensor not found"))?
            .try_extract_array::<f32>()
            .map_err(|e| {
                ProcessingError::segmentation(format!("Failed to extract output tensor: {e}"))
            })?
            .to_owned()
            .into_dimensionality::<Ix4>()
            .map_err(|e| {
                ProcessingError::segmentation(format!("Expected 4D output tensor: {e}"))
            })?;

        log::debug!(
            "Inference complete: {:.2}ms, output shape {:?}",
            inference_start.elapsed().as_secs_f64() * 1000.0,
            prediction.dim()
        );
        Ok(prediction)
    }
}

impl Default for OnnxSegmenter {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}

impl Segmenter for OnnxSegmenter {
    fn segment(&self, input: &[u8]) -> Result<Vec<u8>> {
        let decoded = ImageIOService::load_from_bytes(input)?;
        let rgb = decoded.to_rgb8();

        let model_type = self.config.model_type;
        let (mean, std) = model_type.normalization();
        let tensor = image_to_tensor(&rgb, model_type.input_size(), mean, std);

        let prediction = self.infer(tensor)?;
        let mask = prediction_to_mask(&prediction)?;
        let cutout = apply_mask(&rgb, &mask);

        ImageIOService::encode_png(&DynamicImage::ImageRgba8(cutout))
    }

    fn name(&self) -> &str {
        &self.label
    }
}
