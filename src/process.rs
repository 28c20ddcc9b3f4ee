//! The jewel case pipeline.
//!
//! ```text
//! input ─▶ guard ─▶ scale & crop ─▶ colour ─▶ edges ─▶ corners ─▶ reflection ─▶ rotation ─▶ composite
//!           │                        (each effect optional, order fixed)
//!           └─▶ AlreadyProcessed
//! ```
//!
//! Every stage returns a new buffer; nothing is modified in place. Random
//! draws (corner radii, rotation angle, placement jitter) come from the
//! caller's generator, so a seeded [`rand::rngs::StdRng`] gives reproducible
//! output. [`process`] uses the thread-local generator, which is safe to use
//! from many rayon workers at once.

use crate::imaging::{
    self, BackendError, CornerRadii, ImageBackend, Placement, RustBackend, TARGET_SIZE,
};
use image::{DynamicImage, RgbaImage};
use log::debug;
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    /// Not a failure: the input is already frame-sized, so it was skipped.
    #[error("image appears to be already processed")]
    AlreadyProcessed,
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
}

impl ProcessError {
    pub fn is_already_processed(&self) -> bool {
        matches!(self, Self::AlreadyProcessed)
    }
}

/// Which effects to apply. Stage order is fixed by the pipeline, not by these
/// flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Slight desaturation and contrast reduction with a blue tint.
    pub colour_correction: bool,
    /// Randomly sized rounded corners.
    pub rounded_corners: bool,
    /// Two-pixel transparent feather around the edges.
    pub edge_softening: bool,
    /// Small random nudge of the art's position in the frame.
    pub random_offset: bool,
    /// Subtle random rotation.
    pub random_rotation: bool,
    /// Diagonal white highlight.
    pub reflection: bool,
    /// Process even when the input already looks framed.
    pub force: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            colour_correction: true,
            rounded_corners: true,
            edge_softening: true,
            random_offset: true,
            random_rotation: true,
            reflection: true,
            force: false,
        }
    }
}

impl Options {
    /// Every effect off. Only the scale, crop and frame remain.
    pub fn plain() -> Self {
        Self {
            colour_correction: false,
            rounded_corners: false,
            edge_softening: false,
            random_offset: false,
            random_rotation: false,
            reflection: false,
            force: false,
        }
    }
}

/// Frame `album_art` using the thread-local random generator.
pub fn process(album_art: &DynamicImage, opts: Options) -> Result<RgbaImage, ProcessError> {
    process_with_rng(album_art, opts, &mut rand::rng())
}

/// Frame `album_art`, drawing every random parameter from `rng`.
///
/// Returns [`ProcessError::AlreadyProcessed`] when the input has exactly the
/// frame's dimensions and `opts.force` is off.
pub fn process_with_rng<R: Rng + ?Sized>(
    album_art: &DynamicImage,
    opts: Options,
    rng: &mut R,
) -> Result<RgbaImage, ProcessError> {
    let frame = imaging::frame();
    if !opts.force && (album_art.width(), album_art.height()) == frame.dimensions() {
        return Err(ProcessError::AlreadyProcessed);
    }

    let mut output = imaging::scale_and_crop(&album_art.to_rgba8(), TARGET_SIZE);
    debug!(
        "scaled {}x{} to {}x{}",
        album_art.width(),
        album_art.height(),
        output.width(),
        output.height()
    );

    if opts.colour_correction {
        output = imaging::apply_colour_correction(&output);
        debug!("applied colour correction");
    }
    if opts.edge_softening {
        output = imaging::apply_edge_softening(&output);
        debug!("applied edge softening");
    }
    if opts.rounded_corners {
        let radii = CornerRadii::sample(rng);
        output = imaging::apply_rounded_corners(&output, &radii);
        debug!("applied rounded corners {radii:?}");
    }
    if opts.reflection {
        output = imaging::apply_reflection(&output);
        debug!("applied reflection");
    }
    if opts.random_rotation {
        let angle = imaging::sample_rotation_angle(rng);
        output = imaging::apply_rotation(&output, angle);
        debug!("rotated by {:.4}°", angle.to_degrees());
    }

    let placement = if opts.random_offset {
        Placement::jittered(rng)
    } else {
        Placement::base()
    };
    debug!("compositing at ({}, {})", placement.x, placement.y);

    Ok(imaging::composite(frame, &output, placement))
}

/// Frame the image at `input` and write the result to `output`.
///
/// Formats follow the file extensions (JPEG or PNG). `input` and `output` may
/// be the same path for in-place processing.
pub fn process_file(input: &Path, output: &Path, opts: Options) -> Result<(), ProcessError> {
    process_file_with_backend(&RustBackend::new(), input, output, opts)
}

/// Process a file using a specific backend (allows testing with mock).
///
/// Both extensions are checked before any decoding, and the output is only
/// written once the whole pipeline has succeeded.
pub fn process_file_with_backend(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    opts: Options,
) -> Result<(), ProcessError> {
    for path in [input, output] {
        if !backend.supports(path) {
            return Err(BackendError::UnsupportedFormat {
                path: PathBuf::from(path),
            }
            .into());
        }
    }

    let album_art = backend.load(input)?;
    let framed = process(&album_art, opts)?;
    backend.save(&framed, output)?;
    debug!("wrote {}", output.display());
    Ok(())
}
