//! Image processing in pure Rust, on top of the `image` crate.
//!
//! | Stage | Function |
//! |---|---|
//! | **Scale and crop** | [`scale_and_crop`] (bilinear, centre crop) |
//! | **Colour correction** | [`apply_colour_correction`] |
//! | **Edge softening** | [`apply_edge_softening`] |
//! | **Rounded corners** | [`apply_rounded_corners`] |
//! | **Reflection** | [`apply_reflection`] |
//! | **Rotation** | [`apply_rotation`] (inverse-mapped bilinear resampler) |
//! | **Compositing** | [`composite`] onto the embedded [`frame`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for geometry math (unit testable)
//! - **Parameters**: Constants and randomly drawn stage parameters
//! - **Stages**: geometry, effects and compositor, each returning a new buffer
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] for file decode/encode

pub mod backend;
mod calculations;
pub mod compositor;
pub mod effects;
pub mod frame;
pub mod geometry;
pub mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::fill_scale;
pub use compositor::composite;
pub use effects::{
    apply_colour_correction, apply_edge_softening, apply_reflection, apply_rotation,
    apply_rounded_corners,
};
pub use frame::{frame, frame_dimensions};
pub use geometry::scale_and_crop;
pub use params::{
    CornerRadii, FRAME_OFFSET, Placement, TARGET_SIZE, sample_rotation_angle,
};
pub use rust_backend::{RustBackend, supported_extensions};
