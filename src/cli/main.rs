//! Hoverloon image preparation CLI
//!
//! Enhances `temp_images/image1.png` and removes the background of
//! `temp_images/image2.png`, writing both into the site's public image folder.

use super::config::CliConfigBuilder;
use crate::{
    driver::{self, ProjectLayout},
    error::ProcessingError,
    segmentation::Segmenter,
    services::ConsoleReporter,
    tracing_config::init_cli_tracing,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

/// Exit status when the input directory is missing
pub const EXIT_MISSING_INPUT_DIR: u8 = 1;
/// Exit status for failed operations under `--strict`
pub const EXIT_OPERATION_FAILED: u8 = 2;

/// Hoverloon image preparation tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "hoverloon-images")]
pub struct Cli {
    /// Project root containing temp_images/ and public/ [default: parent of the program's directory]
    ///
    /// The default assumes the binary is installed one level below the root,
    /// e.g. `<root>/scripts/hoverloon-images`. Under `cargo run` the binary
    /// lives in `target/<profile>/`, so the default resolves to `target/`;
    /// pass this flag explicitly in that case.
    #[arg(long, value_name = "PATH")]
    pub project_root: Option<PathBuf>,

    /// Path to the segmentation model (.onnx) [default: $HOVERLOON_MODEL_PATH, ~/.u2net/, ./]
    #[arg(short, long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Segmentation model architecture (u2net, isnet) [default: detected from --model, else u2net]
    #[arg(long, value_name = "NAME")]
    pub model_type: Option<String>,

    /// Number of inference threads (0 = auto-detect)
    #[arg(short, long, default_value_t = 0)]
    pub threads: usize,

    /// Exit with a non-zero status when an operation fails
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging (-v: INFO, -vv: DEBUG, -vvv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_cli_tracing(cli.verbose).context("Failed to initialize tracing")?;

    let config = CliConfigBuilder::from_cli(&cli).context("Invalid CLI arguments")?;
    let layout = match &cli.project_root {
        Some(root) => ProjectLayout::new(root),
        None => ProjectLayout::from_current_exe().context("Failed to resolve project root")?,
    };
    debug!(?config, "configuration");
    info!(root = %layout.root.display(), "project layout resolved");

    let segmenter = create_segmenter(&config);

    match driver::run(&layout, config.enhance, segmenter.as_ref(), &ConsoleReporter) {
        Ok(summary) => {
            if config.strict && summary.has_failures() {
                return Ok(ExitCode::from(EXIT_OPERATION_FAILED));
            }
            Ok(ExitCode::SUCCESS)
        },
        Err(ProcessingError::InputDirectoryMissing(dir)) => {
            debug!(dir = %dir.display(), "input directory missing");
            Ok(ExitCode::from(EXIT_MISSING_INPUT_DIR))
        },
        Err(e) => Err(e).context("Image processing failed"),
    }
}

#[cfg(feature = "onnx")]
fn create_segmenter(config: &crate::config::ProcessingConfig) -> Box<dyn Segmenter> {
    Box::new(crate::backends::OnnxSegmenter::new(config.segmenter.clone()))
}

#[cfg(not(feature = "onnx"))]
fn create_segmenter(_config: &crate::config::ProcessingConfig) -> Box<dyn Segmenter> {
    tracing::warn!("built without the onnx feature; background removal will fail");
    Box::new(crate::backends::UnavailableSegmenter)
}
