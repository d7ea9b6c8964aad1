//! Pixel transforms applied to the current image.
//!
//! Every function takes the image by reference and returns a new one; the
//! caller decides what replaces what. Pixel modes are preserved: an RGBA
//! image stays RGBA, a 16-bit image stays 16-bit.
//!
//! | Transform | Implementation |
//! |---|---|
//! | Resize | `DynamicImage::resize_exact` with Catmull-Rom (bicubic) |
//! | Blur | 5×5 ring convolution ([`Kernel5x5::BLUR`]) |
//! | Detail / Edge Enhance / Sharpen | `DynamicImage::filter3x3` with a [`Kernel3x3`] |
//! | Contour | negated Laplacian through `filter3x3`, then `invert` |
//! | Brightness / contrast | per-channel scaling on normalized values |
//!
//! Convolution only writes pixels whose whole neighbourhood lies inside the
//! image. The outer frame (one pixel for 3×3, two for 5×5) keeps the source
//! pixels; `filter3x3` leaves that frame black, so it is copied back.

use super::calculations::{luma_601, rounded_mean};
use super::params::{Adjustment, Kernel3x3, Kernel5x5};
use crate::controls::FilterKind;
use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, Pixel};

/// Resize to exactly `width` × `height`, ignoring the aspect ratio.
pub fn resize_exact(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    image.resize_exact(width, height, FilterType::CatmullRom)
}

/// Apply a canned filter. Returns `None` for [`FilterKind::None`].
pub fn apply_filter(image: &DynamicImage, kind: FilterKind) -> Option<DynamicImage> {
    let filtered = match kind {
        FilterKind::None => return None,
        FilterKind::Blur => convolve5x5(image, &Kernel5x5::BLUR),
        FilterKind::Contour => contour(image),
        FilterKind::Detail => convolve(image, &Kernel3x3::DETAIL),
        FilterKind::EdgeEnhance => convolve(image, &Kernel3x3::EDGE_ENHANCE),
        FilterKind::Sharpen => convolve(image, &Kernel3x3::SHARPEN),
    };
    Some(filtered)
}

fn convolve(image: &DynamicImage, kernel: &Kernel3x3) -> DynamicImage {
    let mut out = image.filter3x3(kernel.weights());
    restore_from_source(&mut out, image, false);
    out
}

fn contour(image: &DynamicImage) -> DynamicImage {
    let mut out = image.filter3x3(Kernel3x3::NEGATED_LAPLACIAN.weights());
    out.invert();
    restore_from_source(&mut out, image, true);
    out
}

fn convolve5x5(image: &DynamicImage, kernel: &Kernel5x5) -> DynamicImage {
    use DynamicImage::*;
    match image {
        ImageLuma8(b) => ImageLuma8(convolve5x5_buffer(b, kernel)),
        ImageLumaA8(b) => ImageLumaA8(convolve5x5_buffer(b, kernel)),
        ImageRgb8(b) => ImageRgb8(convolve5x5_buffer(b, kernel)),
        ImageRgba8(b) => ImageRgba8(convolve5x5_buffer(b, kernel)),
        ImageLuma16(b) => ImageLuma16(convolve5x5_buffer(b, kernel)),
        ImageLumaA16(b) => ImageLumaA16(convolve5x5_buffer(b, kernel)),
        ImageRgb16(b) => ImageRgb16(convolve5x5_buffer(b, kernel)),
        ImageRgba16(b) => ImageRgba16(convolve5x5_buffer(b, kernel)),
        ImageRgb32F(b) => ImageRgb32F(convolve5x5_buffer(b, kernel)),
        ImageRgba32F(b) => ImageRgba32F(convolve5x5_buffer(b, kernel)),
        other => ImageRgba32F(convolve5x5_buffer(&other.to_rgba32f(), kernel)),
    }
}

/// Every channel, alpha included, is convolved. Images under 5×5 have no
/// interior and come back unchanged.
fn convolve5x5_buffer<P>(
    source: &ImageBuffer<P, Vec<P::Subpixel>>,
    kernel: &Kernel5x5,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
    P::Subpixel: UnitChannel,
{
    let (w, h) = source.dimensions();
    let mut out = source.clone();
    if w < 5 || h < 5 {
        return out;
    }
    let divisor = kernel.divisor();

    for y in 2..h - 2 {
        for x in 2..w - 2 {
            let mut sums = [0.0f32; 4];
            for dy in 0..5 {
                for dx in 0..5 {
                    let weight = kernel.weight(dx, dy);
                    if weight == 0.0 {
                        continue;
                    }
                    let px = source.get_pixel(x + dx - 2, y + dy - 2);
                    for (sum, c) in sums.iter_mut().zip(px.channels()) {
                        *sum += weight * c.to_unit();
                    }
                }
            }
            for (c, sum) in out.get_pixel_mut(x, y).channels_mut().iter_mut().zip(sums) {
                *c = UnitChannel::from_unit(sum / divisor);
            }
        }
    }
    out
}

/// Copy the border frame (and optionally the alpha channel) of `source` into
/// `out`. Both must have the same variant and dimensions.
fn restore_from_source(out: &mut DynamicImage, source: &DynamicImage, alpha: bool) {
    use DynamicImage::*;
    let color = source.color();
    let alpha = (alpha && color.has_alpha()).then(|| color.channel_count() as usize - 1);
    match (out, source) {
        (ImageLuma8(o), ImageLuma8(s)) => restore_buffer(o, s, alpha),
        (ImageLumaA8(o), ImageLumaA8(s)) => restore_buffer(o, s, alpha),
        (ImageRgb8(o), ImageRgb8(s)) => restore_buffer(o, s, alpha),
        (ImageRgba8(o), ImageRgba8(s)) => restore_buffer(o, s, alpha),
        (ImageLuma16(o), ImageLuma16(s)) => restore_buffer(o, s, alpha),
        (ImageLumaA16(o), ImageLumaA16(s)) => restore_buffer(o, s, alpha),
        (ImageRgb16(o), ImageRgb16(s)) => restore_buffer(o, s, alpha),
        (ImageRgba16(o), ImageRgba16(s)) => restore_buffer(o, s, alpha),
        (ImageRgb32F(o), ImageRgb32F(s)) => restore_buffer(o, s, alpha),
        (ImageRgba32F(o), ImageRgba32F(s)) => restore_buffer(o, s, alpha),
        _ => {}
    }
}

fn restore_buffer<P: Pixel>(
    out: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    source: &ImageBuffer<P, Vec<P::Subpixel>>,
    alpha: Option<usize>,
) {
    let (w, h) = source.dimensions();

    for (x, y, px) in out.enumerate_pixels_mut() {
        let original = source.get_pixel(x, y);
        if x == 0 || y == 0 || x + 1 == w || y + 1 == h {
            *px = *original;
        } else if let Some(a) = alpha {
            px.channels_mut()[a] = original.channels()[a];
        }
    }
}

// ============================================================================
// Brightness / contrast
// ============================================================================

/// Channel types that can be viewed as a level in `[0, 1]`.
trait UnitChannel: Copy {
    fn to_unit(self) -> f32;
    fn from_unit(level: f32) -> Self;
}

impl UnitChannel for u8 {
    fn to_unit(self) -> f32 {
        self as f32 / u8::MAX as f32
    }

    fn from_unit(level: f32) -> Self {
        (level.clamp(0.0, 1.0) * u8::MAX as f32).round() as u8
    }
}

impl UnitChannel for u16 {
    fn to_unit(self) -> f32 {
        self as f32 / u16::MAX as f32
    }

    fn from_unit(level: f32) -> Self {
        (level.clamp(0.0, 1.0) * u16::MAX as f32).round() as u16
    }
}

impl UnitChannel for f32 {
    fn to_unit(self) -> f32 {
        self
    }

    fn from_unit(level: f32) -> Self {
        level.clamp(0.0, 1.0)
    }
}

fn map_buffer<P>(buf: &mut ImageBuffer<P, Vec<P::Subpixel>>, f: impl Fn(f32) -> f32)
where
    P: Pixel,
    P::Subpixel: UnitChannel,
{
    for px in buf.pixels_mut() {
        px.apply_without_alpha(|c| UnitChannel::from_unit(f(c.to_unit())));
    }
}

/// Remap every color channel (never alpha) through `f`, keeping the variant.
fn map_levels(image: &mut DynamicImage, f: impl Fn(f32) -> f32) {
    match image {
        DynamicImage::ImageLuma8(b) => map_buffer(b, f),
        DynamicImage::ImageLumaA8(b) => map_buffer(b, f),
        DynamicImage::ImageRgb8(b) => map_buffer(b, f),
        DynamicImage::ImageRgba8(b) => map_buffer(b, f),
        DynamicImage::ImageLuma16(b) => map_buffer(b, f),
        DynamicImage::ImageLumaA16(b) => map_buffer(b, f),
        DynamicImage::ImageRgb16(b) => map_buffer(b, f),
        DynamicImage::ImageRgba16(b) => map_buffer(b, f),
        DynamicImage::ImageRgb32F(b) => map_buffer(b, f),
        DynamicImage::ImageRgba32F(b) => map_buffer(b, f),
        other => {
            let mut buf = other.to_rgba32f();
            map_buffer(&mut buf, f);
            *other = DynamicImage::ImageRgba32F(buf);
        }
    }
}

/// Scale every color channel by `factor`. 0.0 gives black, 1.0 is identity.
pub fn adjust_brightness(image: &DynamicImage, factor: f32) -> DynamicImage {
    let mut out = image.clone();
    map_levels(&mut out, |c| c * factor);
    out
}

/// Scale each channel's distance from the mean gray level by `factor`.
///
/// The mean gray is the average 8-bit 601 luma, rounded to a whole level.
/// 0.0 gives a flat gray image at that level, 1.0 is identity.
pub fn adjust_contrast(image: &DynamicImage, factor: f32) -> DynamicImage {
    let rgb = image.to_rgb8();
    let mean = rounded_mean(rgb.pixels().map(|px| luma_601(px.0)));
    let pivot = mean as f32 / u8::MAX as f32;

    let mut out = image.clone();
    map_levels(&mut out, |c| pivot + (c - pivot) * factor);
    out
}

/// Brightness first, then contrast on the brightened result.
pub fn adjust(image: &DynamicImage, adjustment: Adjustment) -> DynamicImage {
    let brightened = adjust_brightness(image, adjustment.brightness);
    adjust_contrast(&brightened, adjustment.contrast)
}
