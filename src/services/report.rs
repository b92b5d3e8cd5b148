//! Reporting service
//!
//! Operations never print. The driver hands each outcome to a [`Reporter`],
//! which decides how to present it. [`ConsoleReporter`] writes the
//! human-readable `✓`/`✗` lines to stdout; [`RecordingReporter`] keeps them in
//! memory for tests and embedding.

use std::path::Path;
use std::sync::Mutex;

pub const SUCCESS_GLYPH: &str = "✓";
pub const FAILURE_GLYPH: &str = "✗";

/// Sink for user-facing progress and result lines
pub trait Reporter {
    /// Free-form line, printed as is
    fn notice(&self, message: &str);

    /// An operation is about to start
    fn progress(&self, message: &str) {
        self.notice(&format!("  {message}"));
    }

    /// An operation succeeded
    fn success(&self, message: &str) {
        self.notice(&format!("{SUCCESS_GLYPH} {message}"));
    }

    /// An operation failed
    fn failure(&self, message: &str) {
        self.notice(&format!("{FAILURE_GLYPH} {message}"));
    }

    /// An expected input file is absent
    fn missing(&self, path: &Path) {
        self.failure(&format!("{} not found", path.display()));
    }
}

/// Prints report lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn notice(&self, message: &str) {
        println!("{message}");
    }
}

/// Collects report lines in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Whether any reported line contains `needle`
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn notice(&self, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_prefixes() {
        let reporter = RecordingReporter::new();
        reporter.success("Enhanced image saved to out.png (1.0 KB)");
        reporter.failure("Error enhancing image: boom");
        reporter.progress("Processing in.png");
        reporter.missing(Path::new("/tmp/temp_images/image2.png"));

        assert_eq!(
            reporter.lines(),
            vec![
                "✓ Enhanced image saved to out.png (1.0 KB)".to_string(),
                "✗ Error enhancing image: boom".to_string(),
                "  Processing in.png".to_string(),
                "✗ /tmp/temp_images/image2.png not found".to_string(),
            ]
        );
        assert!(reporter.contains("image2.png not found"));
        assert!(!reporter.contains("image1.png"));
    }
}
