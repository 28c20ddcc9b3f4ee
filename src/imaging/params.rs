//! Parameter types for pipeline stages.
//!
//! These structs describe *what* a stage should do. Random draws happen here,
//! once per stage, so the pixel code in [`effects`](super::effects) and
//! [`compositor`](super::compositor) stays deterministic for a given input.
//!
//! ## Types
//!
//! - [`CornerRadii`]: Per-corner radii for the rounded-corner mask, each in [6, 12).
//! - [`Placement`]: Top-left position of the album art inside the frame.

use rand::Rng;

/// Side length of the square the album art is scaled and cropped to.
pub const TARGET_SIZE: u32 = 750;

/// Where the album art sits in the frame before any jitter.
pub const FRAME_OFFSET: (i64, i64) = (98, 13);

/// Maximum horizontal/vertical jitter applied by [`Placement::jittered`].
pub const OFFSET_JITTER: (i64, i64) = (8, 5);

const CORNER_RADIUS_MIN: f64 = 6.0;
const CORNER_RADIUS_MAX: f64 = 12.0;

/// Radii in pixels for the four rounded corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

impl CornerRadii {
    /// Same radius on every corner.
    pub fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }

    /// Draw each corner independently from [6, 12).
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut draw = || rng.random_range(CORNER_RADIUS_MIN..CORNER_RADIUS_MAX);
        Self {
            top_left: draw(),
            top_right: draw(),
            bottom_left: draw(),
            bottom_right: draw(),
        }
    }
}

/// Top-left position of the album art on the frame canvas, in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
}

impl Placement {
    /// The fixed insertion point of the frame asset.
    pub fn base() -> Self {
        Self {
            x: FRAME_OFFSET.0,
            y: FRAME_OFFSET.1,
        }
    }

    /// The insertion point nudged by up to ±8 px horizontally and ±5 px
    /// vertically.
    pub fn jittered<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (jx, jy) = OFFSET_JITTER;
        Self {
            x: FRAME_OFFSET.0 + rng.random_range(-jx..=jx),
            y: FRAME_OFFSET.1 + rng.random_range(-jy..=jy),
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::base()
    }
}

/// Draw a rotation angle in radians, uniform over roughly ±0.5°.
pub fn sample_rotation_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.random::<f64>() - 0.5) * std::f64::consts::PI / 180.0
}
