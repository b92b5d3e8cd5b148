//! Error types for image processing operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for image processing operations
pub type Result<T> = std::result::Result<T, ProcessingError>;

/// Error types for enhancement, segmentation and the driver
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding errors
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// The segmentation capability failed or returned unusable data
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    /// Model lookup or session initialization errors
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The project's input directory does not exist
    #[error("Input directory not found: {}", .0.display())]
    InputDirectoryMissing(PathBuf),

    /// Pixel pipeline errors
    #[error("Processing error: {0}")]
    Processing(String),
}

impl ProcessingError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new segmentation error
    pub fn segmentation<S: Into<String>>(msg: S) -> Self {
        Self::Segmentation(msg.into())
    }

    /// Create a new model error
    pub fn model<S: Into<String>>(msg: S) -> Self {
        Self::Model(msg.into())
    }

    /// Create a new processing error
    pub fn processing<S: Into<String>>(msg: S) -> Self {
        Self::Processing(msg.into())
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {operation} '{path_display}': {error}"),
        ))
    }

    /// Create model error listing the locations that were searched
    pub fn model_not_found(model: &str, searched: &[PathBuf]) -> Self {
        let locations = searched
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::Model(format!(
            "Model '{model}' not found. Searched: {locations}. Pass --model or set HOVERLOON_MODEL_PATH"
        ))
    }

    /// Create processing error with stage context
    pub fn processing_stage_error(stage: &str, details: &str, input_info: Option<&str>) -> Self {
        let input_context = match input_info {
            Some(info) => format!(" (input: {info})"),
            None => String::new(),
        };

        Self::Processing(format!(
            "Processing failed at stage '{stage}'{input_context}: {details}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let err = ProcessingError::invalid_config("negative factor");
        assert!(matches!(err, ProcessingError::InvalidConfig(_)));

        let err = ProcessingError::segmentation("empty output");
        assert!(matches!(err, ProcessingError::Segmentation(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ProcessingError::invalid_config("sharpness must be finite");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: sharpness must be finite"
        );

        let err = ProcessingError::InputDirectoryMissing(PathBuf::from("/tmp/temp_images"));
        assert_eq!(
            err.to_string(),
            "Input directory not found: /tmp/temp_images"
        );
    }

    #[test]
    fn test_enhanced_error_context() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = ProcessingError::file_io_error("write image", Path::new("/out/a.png"), &io_error);
        let error_string = err.to_string();
        assert!(error_string.contains("write image"));
        assert!(error_string.contains("/out/a.png"));
        assert!(matches!(
            err,
            ProcessingError::Io(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied
        ));

        let err = ProcessingError::model_not_found(
            "u2net",
            &[PathBuf::from("/a/u2net.onnx"), PathBuf::from("/b/u2net.onnx")],
        );
        let error_string = err.to_string();
        assert!(error_string.contains("u2net"));
        assert!(error_string.contains("/a/u2net.onnx, /b/u2net.onnx"));

        let err = ProcessingError::processing_stage_error("sharpness", "bad buffer", Some("2x2 RGB"));
        let error_string = err.to_string();
        assert!(error_string.contains("sharpness"));
        assert!(error_string.contains("2x2 RGB"));
    }
}
