//! Directory mode: frame every supported image under a directory, in place.
//!
//! Files are discovered with [walkdir](https://docs.rs/walkdir) and processed
//! in parallel with [rayon](https://docs.rs/rayon). Each file reports a
//! [`FileEvent`]; one file failing never stops the others. Symlinks are
//! followed. An entry the walk cannot read (a locked subdirectory, a dangling
//! link) is reported as [`FileEvent::Unreadable`] and the walk carries on.
//! Only an unreadable root aborts the run, before any file is touched.

use crate::imaging::{ImageBackend, RustBackend};
use crate::process::{Options, ProcessError, process_file_with_backend};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Error walking directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Outcome for one file, in the order files finish.
#[derive(Debug)]
pub enum FileEvent {
    Processed { path: PathBuf },
    Skipped { path: PathBuf },
    Failed { path: PathBuf, error: ProcessError },
    /// The walk could not read this entry; anything below it is missed.
    Unreadable { path: PathBuf, error: walkdir::Error },
}

/// Counts of each outcome across a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, event: &FileEvent) {
        match event {
            FileEvent::Processed { .. } => self.processed += 1,
            FileEvent::Skipped { .. } => self.skipped += 1,
            FileEvent::Failed { .. } | FileEvent::Unreadable { .. } => self.failed += 1,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            processed: self.processed + other.processed,
            skipped: self.skipped + other.skipped,
            failed: self.failed + other.failed,
        }
    }

    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} processed, {} skipped, {} failed",
            self.processed, self.skipped, self.failed
        )
    }
}

/// Frame every supported image under `root` in place.
pub fn process_directory(
    root: &Path,
    opts: Options,
    progress: Option<Sender<FileEvent>>,
) -> Result<BatchSummary, BatchError> {
    process_directory_with_backend(&RustBackend::new(), root, opts, progress)
}

/// Process a directory using a specific backend (allows testing with mock).
pub fn process_directory_with_backend(
    backend: &impl ImageBackend,
    root: &Path,
    opts: Options,
    progress: Option<Sender<FileEvent>>,
) -> Result<BatchSummary, BatchError> {
    let (files, unreadable) = collect_images(backend, root)?;
    log::debug!("found {} images under {}", files.len(), root.display());

    let mut walk_summary = BatchSummary::default();
    for event in unreadable {
        walk_summary.record(&event);
        if let Some(tx) = &progress {
            tx.send(event).ok();
        }
    }

    let summary = files
        .par_iter()
        .map(|path| {
            let event = match process_file_with_backend(backend, path, path, opts) {
                Ok(()) => FileEvent::Processed { path: path.clone() },
                Err(ProcessError::AlreadyProcessed) => FileEvent::Skipped { path: path.clone() },
                Err(error) => FileEvent::Failed {
                    path: path.clone(),
                    error,
                },
            };
            let mut summary = BatchSummary::default();
            summary.record(&event);
            if let Some(tx) = &progress {
                // A dropped receiver only means nobody is listening
                tx.send(event).ok();
            }
            summary
        })
        .reduce(BatchSummary::default, BatchSummary::merge);

    Ok(summary.merge(walk_summary))
}

/// All regular files under `root` with a supported extension, sorted by path,
/// plus a [`FileEvent::Unreadable`] for each entry the walk had to skip.
fn collect_images(
    backend: &impl ImageBackend,
    root: &Path,
) -> Result<(Vec<PathBuf>, Vec<FileEvent>), BatchError> {
    let mut files = Vec::new();
    let mut unreadable = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && backend.supports(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(error) if error.depth() == 0 => return Err(error.into()),
            Err(error) => {
                let path = error.path().unwrap_or(root).to_path_buf();
                log::warn!("cannot read {}: {error}", path.display());
                unreadable.push(FileEvent::Unreadable { path, error });
            }
        }
    }
    Ok((files, unreadable))
}
