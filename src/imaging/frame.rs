//! The jewel case backdrop.
//!
//! The frame is a PNG compiled into the binary and decoded once on first use.
//! Its size is the size of every output image, which is also what the
//! already-processed guard compares inputs against.

use image::RgbaImage;
use std::sync::LazyLock;

static FRAME_PNG: &[u8] = include_bytes!("../../assets/frame.png");

static FRAME: LazyLock<RgbaImage> = LazyLock::new(|| {
    image::load_from_memory_with_format(FRAME_PNG, image::ImageFormat::Png)
        .expect("embedded frame asset must decode")
        .to_rgba8()
});

/// The decoded frame, shared read-only for the life of the process.
pub fn frame() -> &'static RgbaImage {
    &FRAME
}

/// Width and height of the frame (and of every output image).
pub fn frame_dimensions() -> (u32, u32) {
    FRAME.dimensions()
}
