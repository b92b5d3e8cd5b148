//! Project layout and the one-shot driver
//!
//! The driver resolves the fixed Hoverloon paths, prepares the output
//! directory and runs each operation at most once. Per-file problems are
//! reported and recorded; only a missing input directory stops the run.

use crate::{
    config::EnhanceFactors,
    error::{ProcessingError, Result},
    processor::{enhance_image, remove_background},
    segmentation::Segmenter,
    services::Reporter,
    types::SavedImage,
};
use std::path::{Path, PathBuf};

pub const INPUT_DIR: &str = "temp_images";
pub const OUTPUT_DIR: [&str; 4] = ["public", "images", "projects", "hoverloon"];
pub const MAIN_INPUT: &str = "image1.png";
pub const MAIN_OUTPUT: &str = "hoverloon-main.png";
pub const THREE_D_INPUT: &str = "image2.png";
pub const THREE_D_OUTPUT: &str = "hoverloon-3d.png";

/// One input file and where its result goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Fixed directory and file layout of the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Enhanced into `hoverloon-main.png`
    pub main: ImageJob,
    /// Background-removed into `hoverloon-3d.png`
    pub three_d: ImageJob,
}

impl ProjectLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let input_dir = root.join(INPUT_DIR);
        let output_dir = OUTPUT_DIR.iter().fold(root.clone(), |dir, part| dir.join(part));

        Self {
            main: ImageJob {
                input: input_dir.join(MAIN_INPUT),
                output: output_dir.join(MAIN_OUTPUT),
            },
            three_d: ImageJob {
                input: input_dir.join(THREE_D_INPUT),
                output: output_dir.join(THREE_D_OUTPUT),
            },
            root,
            input_dir,
            output_dir,
        }
    }

    /// Layout for a program living one directory below the project root
    /// (for example `<root>/scripts/hoverloon-images`)
    pub fn from_program_location(program: &Path) -> Result<Self> {
        let root = program
            .parent()
            .and_then(Path::parent)
            .ok_or_else(|| {
                ProcessingError::invalid_config(format!(
                    "cannot derive project root from program path '{}'",
                    program.display()
                ))
            })?;
        Ok(Self::new(root))
    }

    /// Layout relative to the currently running executable
    pub fn from_current_exe() -> Result<Self> {
        let exe = std::env::current_exe()
            .map_err(|e| ProcessingError::file_io_error("locate program", ".", &e))?;
        let exe = exe.canonicalize().unwrap_or(exe);
        Self::from_program_location(&exe)
    }
}

/// What happened to one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Saved(SavedImage),
    Failed(String),
    MissingInput(PathBuf),
}

impl JobOutcome {
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Outcomes of a complete run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub main: JobOutcome,
    pub three_d: JobOutcome,
}

impl RunSummary {
    /// Whether any operation was attempted and failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.main.is_failed() || self.three_d.is_failed()
    }
}

/// Prepare directories and run both jobs once
///
/// Returns [`ProcessingError::InputDirectoryMissing`] before touching any image
/// when the input directory is absent. Every other problem ends up in the
/// returned [`RunSummary`].
pub fn run<S, R>(
    layout: &ProjectLayout,
    factors: EnhanceFactors,
    segmenter: &S,
    reporter: &R,
) -> Result<RunSummary>
where
    S: Segmenter + ?Sized,
    R: Reporter + ?Sized,
{
    std::fs::create_dir_all(&layout.output_dir).map_err(|e| {
        ProcessingError::file_io_error("create output directory", &layout.output_dir, &e)
    })?;

    if !layout.input_dir.exists() {
        reporter.notice(&format!(
            "Please create {} and place your images there:",
            layout.input_dir.display()
        ));
        reporter.notice(&format!("  - {MAIN_INPUT} (first hoverloon image)"));
        reporter.notice(&format!(
            "  - {THREE_D_INPUT} (second hoverloon image for 3D rotation)"
        ));
        return Err(ProcessingError::InputDirectoryMissing(
            layout.input_dir.clone(),
        ));
    }

    tracing::info!(root = %layout.root.display(), "processing hoverloon images");

    let main = run_job(&layout.main, reporter, |job| {
        let outcome = enhance_image(&job.input, &job.output, factors);
        match &outcome {
            Ok(saved) => reporter.success(&format!(
                "Enhanced image saved to {} ({:.1} KB)",
                saved.path.display(),
                saved.size_kb()
            )),
            Err(e) => reporter.failure(&format!("Error enhancing image: {e}")),
        }
        outcome
    });

    let three_d = run_job(&layout.three_d, reporter, |job| {
        reporter.progress(&format!(
            "Processing {} with {} (this may take a moment)...",
            job.input.display(),
            segmenter.name()
        ));
        let outcome = remove_background(&job.input, &job.output, segmenter);
        match &outcome {
            Ok(saved) => reporter.success(&format!(
                "Background removed, saved to {} ({:.1} KB)",
                saved.path.display(),
                saved.size_kb()
            )),
            Err(e) => reporter.failure(&format!("Error removing background: {e}")),
        }
        outcome
    });

    reporter.notice("");
    reporter.notice("Image processing complete!");

    Ok(RunSummary { main, three_d })
}

fn run_job<R, F>(job: &ImageJob, reporter: &R, operation: F) -> JobOutcome
where
    R: Reporter + ?Sized,
    F: FnOnce(&ImageJob) -> Result<SavedImage>,
{
    if !job.input.exists() {
        reporter.missing(&job.input);
        return JobOutcome::MissingInput(job.input.clone());
    }

    match operation(job) {
        Ok(saved) => JobOutcome::Saved(saved),
        Err(e) => {
            tracing::warn!(input = %job.input.display(), error = %e, "operation failed");
            JobOutcome::Failed(e.to_string())
        },
    }
}
