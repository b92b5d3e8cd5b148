//! Services separating I/O and presentation from the processing logic

pub mod io;
pub mod report;

pub use io::ImageIOService;
pub use report::{ConsoleReporter, RecordingReporter, Reporter, FAILURE_GLYPH, SUCCESS_GLYPH};
