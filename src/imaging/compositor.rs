//! Places the finished album art onto a copy of the frame.

use super::params::Placement;
use image::{Rgba, RgbaImage};

/// Copy `frame`, then source-over blend `art` with its top-left at `placement`.
///
/// Parts of `art` that land outside the canvas are dropped.
pub fn composite(frame: &RgbaImage, art: &RgbaImage, placement: Placement) -> RgbaImage {
    let mut canvas = frame.clone();
    let (canvas_w, canvas_h) = (canvas.width() as i64, canvas.height() as i64);

    for (x, y, src) in art.enumerate_pixels() {
        let cx = placement.x + x as i64;
        let cy = placement.y + y as i64;
        if cx < 0 || cy < 0 || cx >= canvas_w || cy >= canvas_h {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
        *dst = blend_over(*src, *dst);
    }

    canvas
}

/// Non-premultiplied source-over.
///
/// Over an opaque backdrop this is `src * a + dst * (1 - a)` per channel.
fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f64 / 255.0;
    if sa >= 1.0 {
        return src;
    }
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (src[i] as f64 * sa + dst[i] as f64 * da * (1.0 - sa)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}
