//! File-level scenarios: real JPEG/PNG files on disk through the public API.

use image::{DynamicImage, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use jewelcase::imaging::{BackendError, frame, frame_dimensions};
use jewelcase::process::{Options, ProcessError, process, process_file, process_with_rng};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tempfile::TempDir;

fn write_jpeg(path: &Path, img: &RgbImage) {
    let file = std::fs::File::create(path).unwrap();
    image::codecs::jpeg::JpegEncoder::new_with_quality(std::io::BufWriter::new(file), 95)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
}

fn write_png(path: &Path, img: &RgbaImage) {
    let file = std::fs::File::create(path).unwrap();
    image::codecs::png::PngEncoder::new(std::io::BufWriter::new(file))
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
}

/// Frame pixels outside the widest possible art window must be untouched.
fn assert_outside_window_is_frame(out: &RgbaImage) {
    let frame = frame();
    for (x, y, pixel) in out.enumerate_pixels() {
        let inside = (90..106 + 750).contains(&x) && (8..18 + 750).contains(&y);
        if !inside {
            assert_eq!(pixel, frame.get_pixel(x, y), "pixel ({x},{y}) changed");
        }
    }
}

#[test]
fn landscape_jpeg_is_framed_with_every_effect() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cover.jpg");
    let output = tmp.path().join("framed.png");
    write_jpeg(&input, &RgbImage::from_pixel(1000, 500, Rgb([220, 30, 30])));

    process_file(&input, &output, Options::default()).unwrap();

    let out = image::open(&output).unwrap().to_rgba8();
    assert_eq!(out.dimensions(), frame_dimensions());
    assert_eq!(out.dimensions(), (884, 777));
    assert_outside_window_is_frame(&out);

    let Rgba([r, g, b, a]) = *out.get_pixel(98 + 375, 13 + 375);
    assert!(r > 180, "red channel {r}");
    assert!(g < 100 && b < 100, "green {g} blue {b}");
    assert_eq!(a, 255);
}

#[test]
fn jpeg_output_keeps_frame_size() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cover.png");
    let output = tmp.path().join("framed.JPG");
    write_png(&input, &RgbaImage::from_pixel(300, 640, Rgba([10, 120, 240, 255])));

    process_file(&input, &output, Options::default()).unwrap();

    let out = image::open(&output).unwrap();
    assert_eq!((out.width(), out.height()), frame_dimensions());
}

#[test]
fn frame_sized_input_is_skipped_and_left_alone() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cover.png");
    let (w, h) = frame_dimensions();
    write_png(&path, &RgbaImage::from_pixel(w, h, Rgba([1, 2, 3, 255])));
    let before = std::fs::read(&path).unwrap();

    let err = process_file(&path, &path, Options::default()).unwrap_err();
    assert!(matches!(err, ProcessError::AlreadyProcessed));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn forced_frame_sized_input_is_processed() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cover.png");
    let (w, h) = frame_dimensions();
    write_png(&path, &RgbaImage::from_pixel(w, h, Rgba([1, 2, 3, 255])));

    let opts = Options {
        force: true,
        ..Options::default()
    };
    process_file(&path, &path, opts).unwrap();

    let out = image::open(&path).unwrap().to_rgba8();
    assert_eq!(out.dimensions(), (w, h));
    assert_ne!(*out.get_pixel(98 + 375, 13 + 375), Rgba([1, 2, 3, 255]));
}

#[test]
fn bmp_input_is_unsupported_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cover.bmp");
    let output = tmp.path().join("framed.png");
    std::fs::write(&input, b"BM not really").unwrap();

    let err = process_file(&input, &output, Options::default()).unwrap_err();
    assert!(matches!(
        err,
        ProcessError::Imaging(BackendError::UnsupportedFormat { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn bmp_output_is_unsupported_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cover.png");
    let output = tmp.path().join("framed.bmp");
    write_png(&input, &RgbaImage::from_pixel(50, 50, Rgba([9, 9, 9, 255])));

    let err = process_file(&input, &output, Options::default()).unwrap_err();
    assert!(matches!(
        err,
        ProcessError::Imaging(BackendError::UnsupportedFormat { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn missing_input_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = process_file(
        &tmp.path().join("missing.jpg"),
        &tmp.path().join("out.jpg"),
        Options::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ProcessError::Imaging(BackendError::Io(_))));
}

#[test]
fn seeded_pipeline_stays_inside_offset_window() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(640, 480, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    }));
    for seed in 0..8 {
        let out = process_with_rng(&img, Options::default(), &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_outside_window_is_frame(&out);
    }
}

#[test]
fn concurrent_runs_share_the_frame() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 100, Rgb([50, 60, 70])));
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| process(&img, Options::default()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().dimensions(), frame_dimensions());
        }
    });
}
