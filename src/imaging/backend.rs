//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two places the pipeline touches
//! storage: decoding an input file and encoding the result.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) on top of the `image`
//! crate. Tests swap in a mock so the file-level entry point can be exercised
//! without real files.

use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported image format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Trait for image codec backends.
///
/// `Sync` so one backend can serve every rayon worker in batch mode.
pub trait ImageBackend: Sync {
    /// Whether `path` has an extension this backend can read and write.
    fn supports(&self, path: &Path) -> bool;

    /// Read and decode an image.
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `img` in the format implied by `path` and write it there.
    ///
    /// Nothing is written if encoding fails.
    fn save(&self, img: &RgbaImage, path: &Path) -> Result<(), BackendError>;
}
