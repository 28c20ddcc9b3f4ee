//! Per-pixel effect stages.
//!
//! Every stage borrows its input and returns a fresh buffer of the same size.
//! Stages that need randomness take the already-drawn parameters (see
//! [`params`](super::params)) so they are deterministic for a given input.

use super::calculations::{
    edge_alpha, edge_distance, outside_corner, reflection_intensity, rotation_cover_scale,
};
use super::geometry::resize_bilinear;
use super::params::CornerRadii;
use image::{Rgba, RgbaImage};

/// Peak brightness added by the reflection at full intensity.
const REFLECTION_STRENGTH: f64 = 40.0;

/// Slightly desaturate, flatten contrast and push towards blue.
///
/// Applied in that order per pixel: 90/10 blend towards the channel average,
/// 95/5 blend towards mid-grey, then a 2% blue boost. Alpha is untouched.
pub fn apply_colour_correction(img: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let Rgba([r, g, b, a]) = *img.get_pixel(x, y);
        let (mut fr, mut fg, mut fb) = (r as f64, g as f64, b as f64);

        let avg = (fr + fg + fb) / 3.0;
        fr = fr * 0.9 + avg * 0.1;
        fg = fg * 0.9 + avg * 0.1;
        fb = fb * 0.9 + avg * 0.1;

        fr = fr * 0.95 + 128.0 * 0.05;
        fg = fg * 0.95 + 128.0 * 0.05;
        fb = fb * 0.95 + 128.0 * 0.05;

        fb = f64::min(255.0, fb * 1.02);

        Rgba([quantize(fr), quantize(fg), quantize(fb), a])
    })
}

/// Feather the outer two pixels of the image towards transparency.
pub fn apply_edge_softening(img: &RgbaImage) -> RgbaImage {
    let (width, height) = img.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let pixel = *img.get_pixel(x, y);
        match edge_alpha(edge_distance(x, y, width, height)) {
            Some(factor) => {
                let Rgba([r, g, b, a]) = pixel;
                Rgba([r, g, b, (a as f64 * factor) as u8])
            }
            None => pixel,
        }
    })
}

/// Clear the pixels outside each corner's quarter circle.
pub fn apply_rounded_corners(img: &RgbaImage, radii: &CornerRadii) -> RgbaImage {
    let (width, height) = img.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let left = x as f64;
        let right = (width - x - 1) as f64;
        let top = y as f64;
        let bottom = (height - y - 1) as f64;

        if outside_corner(left, top, radii.top_left)
            || outside_corner(right, top, radii.top_right)
            || outside_corner(left, bottom, radii.bottom_left)
            || outside_corner(right, bottom, radii.bottom_right)
        {
            Rgba([0, 0, 0, 0])
        } else {
            *img.get_pixel(x, y)
        }
    })
}

/// Brighten along a diagonal falloff from the top-left corner.
pub fn apply_reflection(img: &RgbaImage) -> RgbaImage {
    let dims = img.dimensions();
    RgbaImage::from_fn(dims.0, dims.1, |x, y| {
        let Rgba([r, g, b, a]) = *img.get_pixel(x, y);
        let lift = reflection_intensity(x, y, dims) * REFLECTION_STRENGTH;
        let brighten = |c: u8| f64::min(255.0, c as f64 + lift) as u8;
        Rgba([brighten(r), brighten(g), brighten(b), a])
    })
}

/// Rotate by `angle` radians about the centre, without exposing blank corners.
///
/// The image is first shrunk so the rotated copy still covers the canvas, then
/// each destination pixel is mapped back into the shrunk copy and sampled
/// bilinearly. Destinations that map within one pixel of the shrunk copy's
/// edge stay transparent.
///
/// Resampling runs on premultiplied colour so cleared pixels (the rounded
/// corners, the feathered edge) do not darken their neighbours.
pub fn apply_rotation(img: &RgbaImage, angle: f64) -> RgbaImage {
    let (width, height) = img.dimensions();
    let scale = rotation_cover_scale(angle);
    let scaled_w = (width as f64 * scale) as u32;
    let scaled_h = (height as f64 * scale) as u32;
    let scaled = resize_bilinear(&premultiply(img), scaled_w, scaled_h);

    let (sin, cos) = (-angle).sin_cos();
    let (centre_x, centre_y) = (width as f64 / 2.0, height as f64 / 2.0);
    let (half_w, half_h) = (scaled_w as f64 / 2.0, scaled_h as f64 / 2.0);
    let (max_x, max_y) = (scaled_w as f64 - 1.0, scaled_h as f64 - 1.0);

    RgbaImage::from_fn(width, height, |x, y| {
        let fx = x as f64 - centre_x;
        let fy = y as f64 - centre_y;
        let rx = fx * cos - fy * sin + half_w;
        let ry = fx * sin + fy * cos + half_h;

        if rx >= 1.0 && ry >= 1.0 && rx < max_x && ry < max_y {
            unpremultiply(sample_bilinear(&scaled, rx, ry))
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Weighted average of the four pixels around `(fx, fy)`, per channel.
///
/// Callers must keep `fx + 1` and `fy + 1` inside the image.
fn sample_bilinear(img: &RgbaImage, fx: f64, fy: f64) -> [f64; 4] {
    let (x0, y0) = (fx as u32, fy as u32);
    let (tx, ty) = (fx - x0 as f64, fy - y0 as f64);

    let c00 = img.get_pixel(x0, y0).0;
    let c10 = img.get_pixel(x0 + 1, y0).0;
    let c01 = img.get_pixel(x0, y0 + 1).0;
    let c11 = img.get_pixel(x0 + 1, y0 + 1).0;

    let mut out = [0.0; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        *channel = c00[i] as f64 * (1.0 - tx) * (1.0 - ty)
            + c10[i] as f64 * tx * (1.0 - ty)
            + c01[i] as f64 * (1.0 - tx) * ty
            + c11[i] as f64 * tx * ty;
    }
    out
}

/// Scale each colour channel by its pixel's alpha.
fn premultiply(img: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let Rgba([r, g, b, a]) = *img.get_pixel(x, y);
        let mul = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
        Rgba([mul(r), mul(g), mul(b), a])
    })
}

/// Back to straight alpha from an interpolated premultiplied sample.
fn unpremultiply([r, g, b, a]: [f64; 4]) -> Rgba<u8> {
    let alpha = a.round();
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let div = |c: f64| quantize((c * 255.0 / a).round());
    Rgba([div(r), div(g), div(b), quantize(alpha)])
}

fn quantize(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}
