//! Configuration types for enhancement and background removal

use crate::error::{ProcessingError, Result};
use crate::models::ModelType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Strength of each adjustment in the enhancement pipeline.
///
/// A factor of 1.0 leaves the image unchanged, 0.0 yields the fully reduced
/// form (blurred, flat gray, grayscale, black) and values above 1.0 amplify.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnhanceFactors {
    pub sharpness: f32,
    pub contrast: f32,
    pub color: f32,
    pub brightness: f32,
}

impl EnhanceFactors {
    pub const SHARPNESS: f32 = 1.5;
    pub const CONTRAST: f32 = 1.2;
    pub const COLOR: f32 = 1.15;
    pub const BRIGHTNESS: f32 = 1.05;

    /// Factors that leave every pixel untouched
    #[must_use]
    pub fn identity() -> Self {
        Self {
            sharpness: 1.0,
            contrast: 1.0,
            color: 1.0,
            brightness: 1.0,
        }
    }

    /// Reject NaN, infinite and negative factors
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("sharpness", self.sharpness),
            ("contrast", self.contrast),
            ("color", self.color),
            ("brightness", self.brightness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ProcessingError::invalid_config(format!(
                    "{name} factor must be a finite, non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EnhanceFactors {
    fn default() -> Self {
        Self {
            sharpness: Self::SHARPNESS,
            contrast: Self::CONTRAST,
            color: Self::COLOR,
            brightness: Self::BRIGHTNESS,
        }
    }
}

/// Settings for the ONNX segmentation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Explicit model file; searched for when `None`
    pub model_path: Option<PathBuf>,
    /// Model architecture, selects input size and normalization
    pub model_type: ModelType,
    /// Intra-op threads for ONNX Runtime (0 = auto-detect)
    pub intra_threads: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            model_type: ModelType::U2Net,
            intra_threads: 0,
        }
    }
}

/// Complete configuration for one run of the tool
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub enhance: EnhanceFactors,
    pub segmenter: SegmenterConfig,
    /// Exit non-zero when an operation fails
    pub strict: bool,
}

impl ProcessingConfig {
    #[must_use]
    pub fn builder() -> ProcessingConfigBuilder {
        ProcessingConfigBuilder::default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.enhance.validate()?;
        if let Some(path) = &self.segmenter.model_path {
            if path.as_os_str().is_empty() {
                return Err(ProcessingError::invalid_config("model path is empty"));
            }
        }
        Ok(())
    }
}

/// Builder for [`ProcessingConfig`]
#[derive(Debug, Default)]
pub struct ProcessingConfigBuilder {
    config: ProcessingConfig,
}

impl ProcessingConfigBuilder {
    #[must_use]
    pub fn enhance_factors(mut self, factors: EnhanceFactors) -> Self {
        self.config.enhance = factors;
        self
    }

    #[must_use]
    pub fn model_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.segmenter.model_path = path;
        self
    }

    #[must_use]
    pub fn model_type(mut self, model_type: ModelType) -> Self {
        self.config.segmenter.model_type = model_type;
        self
    }

    #[must_use]
    pub fn intra_threads(mut self, threads: usize) -> Self {
        self.config.segmenter.intra_threads = threads;
        self
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ProcessingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
