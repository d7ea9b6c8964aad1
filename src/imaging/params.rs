//! Parameter types for image operations.
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 75). Clamped on construction.
//! - [`Adjustment`]: brightness and contrast multipliers, 1.0 = unchanged.
//! - [`Kernel3x3`]: a normalized 3×3 convolution kernel for the canned filters.
//! - [`Kernel5x5`]: the 5×5 ring kernel used by Blur.

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Brightness and contrast multipliers.
///
/// Brightness scales every color channel toward black (0.0) or past the
/// input (> 1.0). Contrast scales the distance of each channel from the
/// image's mean gray level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub brightness: f32,
    pub contrast: f32,
}

impl Adjustment {
    pub const NEUTRAL: Adjustment = Adjustment {
        brightness: 1.0,
        contrast: 1.0,
    };

    pub fn new(brightness: f32, contrast: f32) -> Self {
        Self {
            brightness,
            contrast,
        }
    }
}

/// Weights of a 3×3 convolution, row-major.
///
/// The `image` crate divides by the sum of the weights (or by 1 when the sum
/// is zero), so a kernel that sums to `n` carries an implicit scale of `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3x3(pub [f32; 9]);

impl Kernel3x3 {
    /// Fine-detail boost; weights sum to 6.
    pub const DETAIL: Kernel3x3 = Kernel3x3([0.0, -1.0, 0.0, -1.0, 10.0, -1.0, 0.0, -1.0, 0.0]);

    /// Edge enhancement; weights sum to 2.
    pub const EDGE_ENHANCE: Kernel3x3 =
        Kernel3x3([-1.0, -1.0, -1.0, -1.0, 10.0, -1.0, -1.0, -1.0, -1.0]);

    /// Sharpening; weights sum to 16.
    pub const SHARPEN: Kernel3x3 =
        Kernel3x3([-2.0, -2.0, -2.0, -2.0, 32.0, -2.0, -2.0, -2.0, -2.0]);

    /// Negated Laplacian. Inverting its output gives `255 - laplacian`, the
    /// white-background contour image.
    pub const NEGATED_LAPLACIAN: Kernel3x3 =
        Kernel3x3([1.0, 1.0, 1.0, 1.0, -8.0, 1.0, 1.0, 1.0, 1.0]);

    pub fn weights(&self) -> &[f32] {
        &self.0
    }
}

/// Weights of a 5×5 convolution, row-major, applied divided by their sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel5x5(pub [f32; 25]);

impl Kernel5x5 {
    /// Box ring: the 16 outer cells weigh 1, the inner 3×3 weighs 0.
    pub const BLUR: Kernel5x5 = Kernel5x5([
        1.0, 1.0, 1.0, 1.0, 1.0, //
        1.0, 0.0, 0.0, 0.0, 1.0, //
        1.0, 0.0, 0.0, 0.0, 1.0, //
        1.0, 0.0, 0.0, 0.0, 1.0, //
        1.0, 1.0, 1.0, 1.0, 1.0,
    ]);

    /// Weight at column `dx`, row `dy` (both 0-4).
    pub fn weight(&self, dx: u32, dy: u32) -> f32 {
        self.0[(dy * 5 + dx) as usize]
    }

    /// Sum of the weights, or 1 when they cancel out.
    pub fn divisor(&self) -> f32 {
        match self.0.iter().sum::<f32>() {
            s if s == 0.0 => 1.0,
            s => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_75() {
        assert_eq!(Quality::default().value(), 75);
    }

    #[test]
    fn kernel_sums_match_filter_definitions() {
        let sum = |k: &Kernel3x3| k.weights().iter().sum::<f32>();
        assert_eq!(sum(&Kernel3x3::DETAIL), 6.0);
        assert_eq!(sum(&Kernel3x3::EDGE_ENHANCE), 2.0);
        assert_eq!(sum(&Kernel3x3::SHARPEN), 16.0);
        assert_eq!(sum(&Kernel3x3::NEGATED_LAPLACIAN), 0.0);
    }

    #[test]
    fn blur_ring_divides_by_sixteen() {
        assert_eq!(Kernel5x5::BLUR.divisor(), 16.0);
        assert_eq!(Kernel5x5::BLUR.weight(0, 0), 1.0);
        assert_eq!(Kernel5x5::BLUR.weight(4, 2), 1.0);
        assert_eq!(Kernel5x5::BLUR.weight(2, 2), 0.0);
        assert_eq!(Kernel5x5::BLUR.weight(1, 3), 0.0);
    }

    #[test]
    fn neutral_adjustment_is_unit() {
        assert_eq!(Adjustment::NEUTRAL, Adjustment::new(1.0, 1.0));
    }
}
