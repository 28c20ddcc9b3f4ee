//! Pure Rust codec backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::ImageReader` with the format chosen by extension |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder`, quality 95, alpha flattened |
//! | Encode → PNG | `image::codecs::png::PngEncoder`, RGBA |

use super::backend::{BackendError, ImageBackend};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageEncoder, ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Extensions the tool reads and writes, matched case-insensitively.
const SUPPORTED: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
];

/// Returns the image file extensions the tool accepts.
pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    SUPPORTED.iter().map(|(ext, _)| *ext)
}

/// Resolve the codec for a path from its extension.
pub fn format_for_path(path: &Path) -> Option<ImageFormat> {
    let ext = path.extension()?.to_str()?;
    SUPPORTED
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
        .map(|(_, format)| *format)
}

fn require_format(path: &Path) -> Result<ImageFormat, BackendError> {
    format_for_path(path).ok_or_else(|| BackendError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}

/// JPEG output quality.
const JPEG_QUALITY: u8 = 95;

/// Backend using the `image` crate's JPEG and PNG codecs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }

    fn encode(&self, img: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
        let mut buf = Vec::new();
        match format {
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
                JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY).write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    image::ExtendedColorType::Rgb8,
                )?;
            }
            _ => {
                PngEncoder::new(&mut buf).write_image(
                    img.as_raw(),
                    img.width(),
                    img.height(),
                    image::ExtendedColorType::Rgba8,
                )?;
            }
        }
        Ok(buf)
    }
}

impl ImageBackend for RustBackend {
    fn supports(&self, path: &Path) -> bool {
        format_for_path(path).is_some()
    }

    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let format = require_format(path)?;
        let bytes = std::fs::read(path)?;
        ImageReader::with_format(Cursor::new(bytes), format)
            .decode()
            .map_err(|source| BackendError::Decode {
                path: path.to_path_buf(),
                source,
            })
    }

    fn save(&self, img: &RgbaImage, path: &Path) -> Result<(), BackendError> {
        let format = require_format(path)?;
        let encoded = self
            .encode(img, format)
            .map_err(|source| BackendError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        std::fs::write(path, encoded)?;
        Ok(())
    }
}
