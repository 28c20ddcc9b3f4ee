//! Pure calculation functions for pipeline geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Scale factor that makes `source` fully cover `target`.
///
/// Picks the larger of the two axis ratios, so one dimension matches the
/// target exactly and the other overshoots. There is never any letterboxing.
///
/// # Examples
/// ```
/// # use jewelcase::imaging::fill_scale;
/// // 1000x500 landscape into a 750 square: height decides
/// assert_eq!(fill_scale((1000, 500), (750, 750)), 1.5);
/// ```
pub fn fill_scale(source: (u32, u32), target: (u32, u32)) -> f64 {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;
    f64::max(tgt_w as f64 / src_w as f64, tgt_h as f64 / src_h as f64)
}

/// Apply a scale factor to dimensions, rounding down.
pub fn scaled_dimensions(source: (u32, u32), scale: f64) -> (u32, u32) {
    let (w, h) = source;
    ((w as f64 * scale) as u32, (h as f64 * scale) as u32)
}

/// Top-left corner of a centred `target`-sized crop inside `scaled`.
///
/// Uses integer division, so odd overshoot leaves the extra pixel on the
/// right/bottom.
pub fn crop_origin(scaled: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (w, h) = scaled;
    let (tgt_w, tgt_h) = target;
    (w.saturating_sub(tgt_w) / 2, h.saturating_sub(tgt_h) / 2)
}

/// Largest scale at which a square rotated by `angle` radians still covers
/// the footprint of the unrotated square.
pub fn rotation_cover_scale(angle: f64) -> f64 {
    let cos = angle.cos().abs();
    let sin = angle.sin().abs();
    f64::min(1.0 / (cos + sin), 1.0)
}

/// Distance in pixels from `(x, y)` to the nearest edge of a `width`x`height`
/// buffer. Border pixels are at distance 0.
pub fn edge_distance(x: u32, y: u32, width: u32, height: u32) -> u32 {
    let from_left = x;
    let from_right = width - x - 1;
    let from_top = y;
    let from_bottom = height - y - 1;
    from_left.min(from_right).min(from_top.min(from_bottom))
}

/// Opacity factor for the feathered rim: linear over the outer two pixels,
/// `None` once the pixel is far enough in to stay untouched.
pub fn edge_alpha(distance: u32) -> Option<f64> {
    if distance < 2 {
        Some(distance as f64 / 2.0)
    } else {
        None
    }
}

/// Whether a pixel `d1`/`d2` pixels in from a corner falls outside that
/// corner's quarter circle of `radius`.
///
/// Only pixels inside the `radius`x`radius` corner square can be clipped.
pub fn outside_corner(d1: f64, d2: f64, radius: f64) -> bool {
    if d1 >= radius || d2 >= radius {
        return false;
    }
    let dx = radius - d1;
    let dy = radius - d2;
    (dx * dx + dy * dy).sqrt() > radius
}

/// Strength of the diagonal glare at `(x, y)`, strongest at the top-left and
/// zero from the far diagonal onwards.
pub fn reflection_intensity(x: u32, y: u32, target: (u32, u32)) -> f64 {
    let fx = x as f64 / target.0 as f64;
    let fy = y as f64 / target.1 as f64;
    f64::max(0.0, 0.3 * (1.0 - (fx + fy) / 2.0))
}
