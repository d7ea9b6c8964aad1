//! Preview conversion: current image → on-screen bitmap.
//!
//! [`to_display_bitmap`] is the only way a preview is produced. It is pure:
//! the input image is never modified, and the result is a fresh RGB8 buffer
//! sized to fit the [`Viewport`].
//!
//! Whatever the source mode (gray, paletted, 16-bit, RGBA), the bitmap is
//! packed `R, G, B` bytes, row-major with no padding. Alpha is dropped for
//! the preview only.

use crate::imaging::calculations::fit_within;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbImage};

/// Preview area the bitmap must fit inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// A scaled, RGB-canonicalized copy of an image, ready to paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DisplayBitmap {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed RGB8 rows.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * 3
    }

    /// Copy into an `RgbImage`, e.g. to write the preview to disk.
    pub fn to_image(&self) -> RgbImage {
        // dimensions and buffer length are tied together at construction
        RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }
}

/// Scale `image` to fit `viewport` (aspect preserved, Lanczos3) and convert
/// it to RGB8.
pub fn to_display_bitmap(image: &DynamicImage, viewport: Viewport) -> DisplayBitmap {
    let (width, height) = fit_within(image.dimensions(), (viewport.width, viewport.height));
    let rgb = image.to_rgb8();

    let scaled = if (width, height) == rgb.dimensions() {
        rgb
    } else {
        imageops::resize(&rgb, width, height, FilterType::Lanczos3)
    };

    DisplayBitmap {
        width,
        height,
        pixels: scaled.into_raw(),
    }
}
