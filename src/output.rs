//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Processed: music/Artist/Album/cover.jpg
//! Skipped: music/Artist/Other/cover.jpg (already processed)
//! Error processing music/broken.jpg: Image processing failed: failed to decode ...
//! Cannot read music/Locked: IO error for operation on music/Locked: Permission denied ...
//!
//! 1 processed, 1 skipped, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each message has a `format_*` function (pure, returns `String`) for
//! testability and a `print_*` wrapper that picks the stream: successes and
//! skips go to stdout, errors to stderr.

use crate::batch::{BatchSummary, FileEvent};
use crate::process::ProcessError;
use std::path::Path;

/// One line for a file that was framed.
pub fn format_processed(path: &Path) -> String {
    format!("Processed: {}", path.display())
}

/// One line for a file skipped by the already-processed guard.
pub fn format_skipped(path: &Path) -> String {
    format!("Skipped: {} (already processed)", path.display())
}

/// One line for a file that failed.
pub fn format_failed(path: &Path, error: &ProcessError) -> String {
    format!("Error processing {}: {}", path.display(), error)
}

/// One line for a directory entry the walk could not read.
pub fn format_unreadable(path: &Path, error: &walkdir::Error) -> String {
    format!("Cannot read {}: {}", path.display(), error)
}

/// Format a batch event, returning the line and whether it is an error.
pub fn format_file_event(event: &FileEvent) -> (String, bool) {
    match event {
        FileEvent::Processed { path } => (format_processed(path), false),
        FileEvent::Skipped { path } => (format_skipped(path), false),
        FileEvent::Failed { path, error } => (format_failed(path, error), true),
        FileEvent::Unreadable { path, error } => (format_unreadable(path, error), true),
    }
}

/// Final line of a batch run.
pub fn format_summary(summary: &BatchSummary) -> String {
    if summary.total() == 0 {
        "No images found".to_string()
    } else {
        summary.to_string()
    }
}

pub fn print_file_event(event: &FileEvent) {
    match format_file_event(event) {
        (line, true) => eprintln!("{}", line),
        (line, false) => println!("{}", line),
    }
}

pub fn print_summary(summary: &BatchSummary) {
    println!();
    println!("{}", format_summary(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::BackendError;
    use std::path::PathBuf;

    #[test]
    fn processed_line() {
        let event = FileEvent::Processed {
            path: PathBuf::from("music/cover.jpg"),
        };
        assert_eq!(
            format_file_event(&event),
            ("Processed: music/cover.jpg".to_string(), false)
        );
    }

    #[test]
    fn skipped_line() {
        let event = FileEvent::Skipped {
            path: PathBuf::from("music/cover.png"),
        };
        assert_eq!(
            format_file_event(&event),
            (
                "Skipped: music/cover.png (already processed)".to_string(),
                false
            )
        );
    }

    #[test]
    fn failed_line_goes_to_stderr() {
        let event = FileEvent::Failed {
            path: PathBuf::from("music/cover.jpg"),
            error: ProcessError::Imaging(BackendError::UnsupportedFormat {
                path: PathBuf::from("music/cover.jpg"),
            }),
        };
        let (line, is_error) = format_file_event(&event);
        assert!(is_error);
        assert_eq!(
            line,
            "Error processing music/cover.jpg: Image processing failed: \
             unsupported image format: music/cover.jpg"
        );
    }

    #[test]
    fn summary_line() {
        let summary = BatchSummary {
            processed: 2,
            skipped: 0,
            failed: 1,
        };
        assert_eq!(format_summary(&summary), "2 processed, 0 skipped, 1 failed");
    }

    #[test]
    fn empty_summary_line() {
        assert_eq!(format_summary(&BatchSummary::default()), "No images found");
    }
}
