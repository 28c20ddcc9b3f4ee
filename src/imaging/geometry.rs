//! Scale-and-crop: the only stage that changes buffer dimensions.

use super::calculations::{crop_origin, fill_scale, scaled_dimensions};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Bilinear resize. Returns a plain copy when the size already matches.
pub(crate) fn resize_bilinear(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, FilterType::Triangle)
}

/// Resize `img` to cover a `target`x`target` square, then centre-crop to it.
///
/// Sources smaller than the target are upsampled.
pub fn scale_and_crop(img: &RgbaImage, target: u32) -> RgbaImage {
    let source = img.dimensions();
    let scale = fill_scale(source, (target, target));
    let (w, h) = scaled_dimensions(source, scale);
    // Rounding down can land one pixel short of the target
    let (w, h) = (w.max(target), h.max(target));

    let scaled = resize_bilinear(img, w, h);
    let (crop_x, crop_y) = crop_origin((w, h), (target, target));
    imageops::crop_imm(&scaled, crop_x, crop_y, target, target).to_image()
}
