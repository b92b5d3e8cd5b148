//! Segmentation model types and model file lookup
//!
//! Models are never downloaded; the file must already exist in one of the
//! searched locations.

use crate::error::{ProcessingError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding an explicit model path
pub const MODEL_PATH_ENV: &str = "HOVERLOON_MODEL_PATH";

/// Cache directory (relative to home) shared with other U²-Net tooling
pub const MODEL_CACHE_DIR: &str = ".u2net";

// ImageNet normalization constants
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Supported background removal model architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    /// General purpose U²-Net, 320x320 input
    U2Net,
    /// `ISNet` general use, 1024x1024 input
    ISNet,
}

impl ModelType {
    /// Square input resolution expected by the model
    #[must_use]
    pub fn input_size(self) -> u32 {
        match self {
            Self::U2Net => 320,
            Self::ISNet => 1024,
        }
    }

    /// File name the model is conventionally stored under
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::U2Net => "u2net.onnx",
            Self::ISNet => "isnet-general-use.onnx",
        }
    }

    /// Per-channel mean and standard deviation applied after scaling to `0..=1`
    #[must_use]
    pub fn normalization(self) -> ([f32; 3], [f32; 3]) {
        match self {
            Self::U2Net => (IMAGENET_MEAN, IMAGENET_STD),
            Self::ISNet => ([0.5, 0.5, 0.5], [1.0, 1.0, 1.0]),
        }
    }

    /// Parse model type from a name such as `u2net` or `isnet`
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "u2net" => Some(Self::U2Net),
            "isnet" | "isnet-general-use" => Some(Self::ISNet),
            _ => None,
        }
    }

    /// Try to detect the model type from a model file name
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?.to_lowercase();
        if stem.contains("isnet") {
            Some(Self::ISNet)
        } else if stem.contains("u2net") {
            Some(Self::U2Net)
        } else {
            None
        }
    }

    #[must_use]
    pub fn all_names() -> &'static [&'static str] {
        &["u2net", "isnet"]
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U2Net => write!(f, "u2net"),
            Self::ISNet => write!(f, "isnet"),
        }
    }
}

/// Candidate locations for a model, in search order.
///
/// The explicit path wins, then [`MODEL_PATH_ENV`], then
/// `~/.u2net/<file>`, then the current directory.
#[must_use]
pub fn candidate_paths(explicit: Option<&Path>, model_type: ModelType) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(MODEL_PATH_ENV) {
        if !env_path.is_empty() {
            candidates.push(PathBuf::from(env_path));
        }
    }

    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(MODEL_CACHE_DIR).join(model_type.file_name()));
    }

    candidates.push(PathBuf::from(model_type.file_name()));
    candidates
}

/// Resolve the model file, failing with the list of searched locations
pub fn find_model_path(explicit: Option<&Path>, model_type: ModelType) -> Result<PathBuf> {
    // An explicit path that does not exist is a hard error, not a fallthrough
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(ProcessingError::model_not_found(
            &model_type.to_string(),
            &[path.to_path_buf()],
        ));
    }

    let candidates = candidate_paths(None, model_type);
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => {
            log::debug!("Using {} model at {}", model_type, path.display());
            Ok(path.clone())
        },
        None => Err(ProcessingError::model_not_found(
            &model_type.to_string(),
            &candidates,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_model_type_from_name() {
        assert_eq!(ModelType::from_name("U2Net"), Some(ModelType::U2Net));
        assert_eq!(ModelType::from_name("isnet"), Some(ModelType::ISNet));
        assert_eq!(ModelType::from_name("birefnet"), None);
        for name in ModelType::all_names() {
            assert!(ModelType::from_name(name).is_some());
        }
    }

    #[test]
    fn test_model_type_from_path() {
        assert_eq!(
            ModelType::from_path(Path::new("/m/isnet-general-use.onnx")),
            Some(ModelType::ISNet)
        );
        assert_eq!(
            ModelType::from_path(Path::new("u2net.onnx")),
            Some(ModelType::U2Net)
        );
        assert_eq!(ModelType::from_path(Path::new("model.onnx")), None);
    }

    #[test]
    fn test_input_sizes() {
        assert_eq!(ModelType::U2Net.input_size(), 320);
        assert_eq!(ModelType::ISNet.input_size(), 1024);
    }

    #[test]
    fn test_explicit_path_is_used() {
        let temp_dir = TempDir::new().unwrap();
        let model = temp_dir.path().join("custom.onnx");
        std::fs::write(&model, b"onnx").unwrap();

        let found = find_model_path(Some(&model), ModelType::U2Net).unwrap();
        assert_eq!(found, model);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let model = temp_dir.path().join("absent.onnx");

        let err = find_model_path(Some(&model), ModelType::U2Net).unwrap_err();
        assert!(matches!(err, ProcessingError::Model(_)));
        assert!(err.to_string().contains("absent.onnx"));
    }

    #[test]
    fn test_candidates_start_with_explicit_and_end_with_cwd() {
        let explicit = PathBuf::from("/opt/models/u2net.onnx");
        let candidates = candidate_paths(Some(&explicit), ModelType::U2Net);
        assert_eq!(candidates.first(), Some(&explicit));
        assert_eq!(candidates.last(), Some(&PathBuf::from("u2net.onnx")));
    }
}
