//! Pure calculation functions for image dimensions and levels.
//!
//! All functions here are pure and testable without any I/O or images.

/// Scale `source` to the largest size that fits inside `bounds` while keeping
/// its aspect ratio. Scales up as well as down.
///
/// Each edge is rounded to the nearest pixel and never drops below 1.
/// A zero-area source or zero bounds are returned unchanged.
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (w, h) = source;
    let (bw, bh) = bounds;
    if w == 0 || h == 0 || bw == 0 || bh == 0 {
        return source;
    }

    let scale = f64::min(bw as f64 / w as f64, bh as f64 / h as f64);
    let fit = |edge: u32, bound: u32| ((edge as f64 * scale).round() as u32).clamp(1, bound);
    (fit(w, bw), fit(h, bh))
}

/// 8-bit gray level of an RGB pixel with ITU-R 601-2 weights
/// (0.299 R + 0.587 G + 0.114 B) in 16-bit fixed point, rounded.
pub fn luma_601([r, g, b]: [u8; 3]) -> u8 {
    let weighted = r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471;
    ((weighted + 0x8000) >> 16) as u8
}

/// Mean of 8-bit levels rounded half up to a whole level; 0 when empty.
pub fn rounded_mean(levels: impl IntoIterator<Item = u8>) -> u8 {
    let (sum, count) = levels
        .into_iter()
        .fold((0u64, 0u64), |(sum, n), l| (sum + l as u64, n + 1));
    if count == 0 {
        return 0;
    }
    ((2 * sum + count) / (2 * count)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_landscape_into_viewport() {
        // 1600x900 → width-bound
        assert_eq!(fit_within((1600, 900), (800, 600)), (800, 450));
    }

    #[test]
    fn fit_portrait_into_viewport() {
        // 1200x1600 → height-bound
        assert_eq!(fit_within((1200, 1600), (800, 600)), (450, 600));
    }

    #[test]
    fn fit_scales_small_images_up() {
        assert_eq!(fit_within((200, 150), (800, 600)), (800, 600));
        assert_eq!(fit_within((100, 100), (800, 600)), (600, 600));
    }

    #[test]
    fn fit_exact_match_is_unchanged() {
        assert_eq!(fit_within((800, 600), (800, 600)), (800, 600));
    }

    #[test]
    fn fit_extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_within((2000, 10), (800, 600)), (800, 4));
        assert_eq!(fit_within((10000, 1), (800, 600)), (800, 1));
    }

    #[test]
    fn fit_zero_area_is_passthrough() {
        assert_eq!(fit_within((0, 50), (800, 600)), (0, 50));
        assert_eq!(fit_within((50, 50), (0, 600)), (50, 50));
    }

    #[test]
    fn luma_uses_601_weights() {
        assert_eq!(luma_601([0, 0, 0]), 0);
        assert_eq!(luma_601([255, 255, 255]), 255);
        assert_eq!(luma_601([255, 0, 0]), 76);
        assert_eq!(luma_601([0, 255, 0]), 150);
        assert_eq!(luma_601([0, 0, 255]), 29);
        assert_eq!(luma_601([90, 90, 90]), 90);
    }

    #[test]
    fn mean_rounds_half_up() {
        assert_eq!(rounded_mean(Vec::<u8>::new()), 0);
        assert_eq!(rounded_mean([0, 255]), 128);
        assert_eq!(rounded_mean([10, 11, 11]), 11);
        assert_eq!(rounded_mean([10, 10, 11]), 10);
    }
}
