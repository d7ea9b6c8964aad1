//! Control values: the read-only snapshot of UI state consumed by each edit.
//!
//! A GUI reads sliders and dropdowns at the moment a button is pressed; here
//! that moment is captured in a [`ControlValues`] value and passed explicitly
//! into every dispatch. Nothing in this module touches pixels.
//!
//! | Control | Range | Default |
//! |---|---|---|
//! | width / height slider | 10–2000 | 10 (set to the image size after load) |
//! | brightness / contrast slider | 0–200 | 100 (factor 1.0) |
//! | filter selector | six entries, "No Filter" first | No Filter |
//! | format selector | five entries, PNG first | PNG |
//!
//! Ranges are enforced where values enter the program (the CLI step parser
//! and [`ControlValues::validate`]). The image session trusts its callers.

use image::ImageFormat;
use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Width and height slider range, in pixels.
pub const DIMENSION_RANGE: RangeInclusive<u32> = 10..=2000;

/// Brightness and contrast slider range. `100` is neutral.
pub const LEVEL_RANGE: RangeInclusive<u32> = 0..=200;

/// Slider position that maps to a factor of exactly 1.0.
pub const NEUTRAL_LEVEL: u32 = 100;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ControlError {
    #[error("{control} must be between {min} and {max}, got {value}")]
    OutOfRange {
        control: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("Unknown filter: {0:?} (expected one of: {list})", list = FilterKind::labels())]
    UnknownFilter(String),
    #[error("Unknown format: {0:?} (expected one of: {list})", list = OutputFormat::labels())]
    UnknownFormat(String),
    #[error("Invalid step {0:?}: {1}")]
    InvalidStep(String, String),
}

/// Convert a brightness/contrast slider position into a multiplier.
pub fn slider_to_factor(value: u32) -> f32 {
    value as f32 / NEUTRAL_LEVEL as f32
}

/// Check a slider value against its range.
pub fn check_range(
    control: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<u32, ControlError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ControlError::OutOfRange {
            control,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Lower-case and strip separators so "Edge Enhance", "edge-enhance" and
/// "EDGE_ENHANCE" all compare equal.
fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// Filter selector
// ============================================================================

/// The canned filters offered by the filter selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    #[default]
    None,
    Blur,
    Contour,
    Detail,
    EdgeEnhance,
    Sharpen,
}

impl FilterKind {
    /// Selector entries in display order.
    pub const ALL: [FilterKind; 6] = [
        FilterKind::None,
        FilterKind::Blur,
        FilterKind::Contour,
        FilterKind::Detail,
        FilterKind::EdgeEnhance,
        FilterKind::Sharpen,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::None => "No Filter",
            FilterKind::Blur => "Blur",
            FilterKind::Contour => "Contour",
            FilterKind::Detail => "Detail",
            FilterKind::EdgeEnhance => "Edge Enhance",
            FilterKind::Sharpen => "Sharpen",
        }
    }

    fn labels() -> String {
        Self::ALL.map(Self::label).join(", ")
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterKind {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        if wanted == "none" {
            return Ok(FilterKind::None);
        }
        Self::ALL
            .into_iter()
            .find(|kind| normalize_name(kind.label()) == wanted)
            .ok_or_else(|| ControlError::UnknownFilter(s.to_string()))
    }
}

// ============================================================================
// Format selector
// ============================================================================

/// Output encodings offered by the format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Tiff,
    WebP,
}

impl OutputFormat {
    /// Selector entries in display order.
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Png,
        OutputFormat::Jpeg,
        OutputFormat::Bmp,
        OutputFormat::Tiff,
        OutputFormat::WebP,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Bmp => "BMP",
            OutputFormat::Tiff => "TIFF",
            OutputFormat::WebP => "WebP",
        }
    }

    /// File extension written by the convert action (the lower-cased label).
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tiff => "tiff",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::WebP => ImageFormat::WebP,
        }
    }

    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "bmp" => Some(OutputFormat::Bmp),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            "webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Suggested filename for the convert action, e.g. `converted_image.webp`.
    pub fn default_filename(self) -> String {
        format!("converted_image.{}", self.extension())
    }

    fn labels() -> String {
        Self::ALL.map(Self::label).join(", ")
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim()).ok_or_else(|| ControlError::UnknownFormat(s.to_string()))
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Snapshot of every control at the moment an action is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlValues {
    pub width: u32,
    pub height: u32,
    pub filter: FilterKind,
    pub format: OutputFormat,
    /// Brightness slider position, 0–200.
    pub brightness: u32,
    /// Contrast slider position, 0–200.
    pub contrast: u32,
}

impl Default for ControlValues {
    fn default() -> Self {
        Self {
            width: *DIMENSION_RANGE.start(),
            height: *DIMENSION_RANGE.start(),
            filter: FilterKind::default(),
            format: OutputFormat::default(),
            brightness: NEUTRAL_LEVEL,
            contrast: NEUTRAL_LEVEL,
        }
    }
}

impl ControlValues {
    /// Brightness multiplier (`slider / 100`).
    pub fn brightness_factor(&self) -> f32 {
        slider_to_factor(self.brightness)
    }

    /// Contrast multiplier (`slider / 100`).
    pub fn contrast_factor(&self) -> f32 {
        slider_to_factor(self.contrast)
    }

    /// Move the size sliders to the given dimensions, pinned to the slider range.
    pub fn with_dimensions(self, width: u32, height: u32) -> Self {
        let (lo, hi) = (*DIMENSION_RANGE.start(), *DIMENSION_RANGE.end());
        Self {
            width: width.clamp(lo, hi),
            height: height.clamp(lo, hi),
            ..self
        }
    }

    pub fn with_levels(self, brightness: u32, contrast: u32) -> Self {
        Self {
            brightness,
            contrast,
            ..self
        }
    }

    /// Reject slider positions a real widget could never produce.
    pub fn validate(&self) -> Result<(), ControlError> {
        check_range("width", self.width, &DIMENSION_RANGE)?;
        check_range("height", self.height, &DIMENSION_RANGE)?;
        check_range("brightness", self.brightness, &LEVEL_RANGE)?;
        check_range("contrast", self.contrast, &LEVEL_RANGE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_selector_has_six_entries_in_order() {
        let labels: Vec<_> = FilterKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            [
                "No Filter",
                "Blur",
                "Contour",
                "Detail",
                "Edge Enhance",
                "Sharpen"
            ]
        );
    }

    #[test]
    fn format_selector_has_five_entries_in_order() {
        let labels: Vec<_> = OutputFormat::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["PNG", "JPEG", "BMP", "TIFF", "WebP"]);
    }

    #[test]
    fn filter_parses_labels_and_cli_spellings() {
        assert_eq!("No Filter".parse(), Ok(FilterKind::None));
        assert_eq!("none".parse(), Ok(FilterKind::None));
        assert_eq!("Edge Enhance".parse(), Ok(FilterKind::EdgeEnhance));
        assert_eq!("edge-enhance".parse(), Ok(FilterKind::EdgeEnhance));
        assert_eq!("EDGE_ENHANCE".parse(), Ok(FilterKind::EdgeEnhance));
        assert_eq!("sharpen".parse(), Ok(FilterKind::Sharpen));
    }

    #[test]
    fn filter_unknown_name_is_error() {
        let err = "emboss".parse::<FilterKind>().unwrap_err();
        assert_eq!(err, ControlError::UnknownFilter("emboss".into()));
        assert!(err.to_string().contains("Edge Enhance"));
    }

    #[test]
    fn format_parses_labels_and_aliases() {
        assert_eq!("WebP".parse(), Ok(OutputFormat::WebP));
        assert_eq!("jpg".parse(), Ok(OutputFormat::Jpeg));
        assert_eq!("TIF".parse(), Ok(OutputFormat::Tiff));
        assert!("gif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn format_from_path_is_case_insensitive() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/Photo.JPG")),
            Some(OutputFormat::Jpeg)
        );
        assert_eq!(OutputFormat::from_path(Path::new("noext")), None);
        assert_eq!(OutputFormat::from_path(Path::new("a.gif")), None);
    }

    #[test]
    fn default_convert_filenames_use_lowercase_label() {
        assert_eq!(OutputFormat::Png.default_filename(), "converted_image.png");
        assert_eq!(OutputFormat::Jpeg.default_filename(), "converted_image.jpeg");
        assert_eq!(OutputFormat::WebP.default_filename(), "converted_image.webp");
    }

    #[test]
    fn slider_factor_is_value_over_hundred() {
        assert_eq!(slider_to_factor(0), 0.0);
        assert_eq!(slider_to_factor(100), 1.0);
        assert_eq!(slider_to_factor(150), 1.5);
        assert_eq!(slider_to_factor(200), 2.0);
    }

    #[test]
    fn defaults_match_widget_initial_state() {
        let controls = ControlValues::default();
        assert_eq!((controls.width, controls.height), (10, 10));
        assert_eq!(controls.filter, FilterKind::None);
        assert_eq!(controls.format, OutputFormat::Png);
        assert_eq!(controls.brightness_factor(), 1.0);
        assert_eq!(controls.contrast_factor(), 1.0);
        assert!(controls.validate().is_ok());
    }

    #[test]
    fn with_dimensions_pins_to_slider_range() {
        let controls = ControlValues::default().with_dimensions(4000, 3);
        assert_eq!((controls.width, controls.height), (2000, 10));
    }

    #[test]
    fn validate_rejects_out_of_range_levels() {
        let controls = ControlValues::default().with_levels(201, 100);
        assert_eq!(
            controls.validate(),
            Err(ControlError::OutOfRange {
                control: "brightness",
                value: 201,
                min: 0,
                max: 200,
            })
        );
    }

    #[test]
    fn validate_rejects_tiny_dimensions() {
        let controls = ControlValues {
            width: 9,
            ..ControlValues::default()
        };
        assert!(matches!(
            controls.validate(),
            Err(ControlError::OutOfRange {
                control: "width",
                ..
            })
        ));
    }
}
