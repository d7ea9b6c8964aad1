//! Shared test utilities: synthetic images and fixture files.
//!
//! Every helper builds its pixels deterministically from coordinates, so
//! tests can compare bytes across runs without shipping binary fixtures.

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Opaque RGB gradient: red follows x, green follows y, blue fixed.
pub fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// RGBA gradient whose alpha varies along the diagonal.
pub fn gradient_rgba(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            200,
            ((x + y) % 256) as u8,
        ])
    }))
}

/// Mid-tone checkerboard with 4-pixel cells. Sharp edges without clipping,
/// so every filter visibly changes it.
pub fn checkerboard_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        if (x / 4 + y / 4) % 2 == 0 {
            Rgb([60, 70, 80])
        } else {
            Rgb([190, 180, 170])
        }
    }))
}

/// Write `image` as PNG into `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, image: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    image
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();
    path
}
