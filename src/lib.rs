#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # Hoverloon Image Preparation
//!
//! Prepares the two Hoverloon project images for the portfolio site:
//!
//! - **Enhancement**: the first image goes through a fixed pipeline of
//!   sharpness (1.5), contrast (1.2), color saturation (1.15) and brightness
//!   (1.05) adjustments and is written as PNG.
//! - **Background removal**: the second image is handed, as raw bytes, to a
//!   foreground segmentation model and the alpha-matted cutout is written as
//!   PNG.
//!
//! The segmentation model sits behind the [`Segmenter`] trait. The default
//! implementation runs a U²-Net model with ONNX Runtime; any
//! `Fn(&[u8]) -> Result<Vec<u8>>` works as well, which keeps the plumbing
//! testable without a model.
//!
//! ## Feature Flags
//!
//! - `onnx` (default): ONNX Runtime segmentation backend
//! - `cli` (default): command-line interface and tracing subscriber setup
//!
//! ## Example
//!
//! ```rust,no_run
//! use hoverloon_images::{
//!     driver::{self, ProjectLayout},
//!     EnhanceFactors, ConsoleReporter, ProcessingError, Result,
//! };
//!
//! # fn example() -> Result<()> {
//! let layout = ProjectLayout::new("/path/to/site");
//! let stub = |bytes: &[u8]| -> Result<Vec<u8>> { Ok(bytes.to_vec()) };
//!
//! match driver::run(&layout, EnhanceFactors::default(), &stub, &ConsoleReporter) {
//!     Ok(summary) => println!("failures: {}", summary.has_failures()),
//!     Err(ProcessingError::InputDirectoryMissing(dir)) => {
//!         eprintln!("{} is missing", dir.display());
//!     },
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod backends;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod driver;
pub mod enhance;
pub mod error;
pub mod models;
pub mod processor;
pub mod segmentation;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;

// Public API exports
pub use backends::*;
pub use config::{EnhanceFactors, ProcessingConfig, ProcessingConfigBuilder, SegmenterConfig};
pub use driver::{ImageJob, JobOutcome, ProjectLayout, RunSummary};
pub use enhance::EnhancementPipeline;
pub use error::{ProcessingError, Result};
pub use models::ModelType;
pub use processor::{enhance_image, remove_background};
pub use segmentation::Segmenter;
pub use services::{ConsoleReporter, ImageIOService, RecordingReporter, Reporter};
pub use types::SavedImage;

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig};
