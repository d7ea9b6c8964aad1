//! CLI output formatting.
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.
//!
//! ## Edit
//!
//! ```text
//! source.png (400x300 Rgb8)
//! 001 resize → 200x150
//! 002 apply filter (Sharpen) → 200x150
//! 003 adjust (brightness 1.50, contrast 0.50) → 200x150
//! Saved manipulated_image.png (PNG)
//! ```
//!
//! ## Info
//!
//! ```text
//! photo.jpg
//!     Size: 4000x3000
//!     Color: Rgb8
//!     Preview: 800x600
//! ```

use crate::controls::{
    ControlValues, DIMENSION_RANGE, FilterKind, LEVEL_RANGE, NEUTRAL_LEVEL, OutputFormat,
};
use crate::display::{DisplayBitmap, Viewport};
use crate::editor::Action;
use crate::imaging::calculations::fit_within;
use crate::session::Outcome;
use image::DynamicImage;
use serde::Serialize;
use std::path::Path;

const INDENT: &str = "    ";

/// What `info` reports about an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub color: String,
    pub preview_width: u32,
    pub preview_height: u32,
}

impl ImageSummary {
    pub fn new(path: &Path, image: &DynamicImage, viewport: Viewport) -> Self {
        let (preview_width, preview_height) = fit_within(
            (image.width(), image.height()),
            (viewport.width, viewport.height),
        );
        Self {
            path: path.display().to_string(),
            width: image.width(),
            height: image.height(),
            color: format!("{:?}", image.color()),
            preview_width,
            preview_height,
        }
    }
}

pub fn format_image_summary(summary: &ImageSummary) -> Vec<String> {
    vec![
        summary.path.clone(),
        format!("{INDENT}Size: {}x{}", summary.width, summary.height),
        format!("{INDENT}Color: {}", summary.color),
        format!(
            "{INDENT}Preview: {}x{}",
            summary.preview_width, summary.preview_height
        ),
    ]
}

pub fn print_image_summary(summary: &ImageSummary) {
    for line in format_image_summary(summary) {
        println!("{line}");
    }
}

/// Header line for an edit run: source path plus its loaded size and mode.
pub fn format_loaded(path: &Path, image: &DynamicImage) -> String {
    format!(
        "{} ({}x{} {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    )
}

/// The control values an action actually read, for display.
fn action_detail(action: &Action, controls: &ControlValues) -> Option<String> {
    match action {
        Action::ApplyFilter => Some(controls.filter.label().to_string()),
        Action::Adjust => Some(format!(
            "brightness {:.2}, contrast {:.2}",
            controls.brightness_factor(),
            controls.contrast_factor()
        )),
        _ => None,
    }
}

/// One numbered line per edit step.
pub fn format_step(
    index: usize,
    action: &Action,
    controls: &ControlValues,
    outcome: Outcome,
    current: Option<(u32, u32)>,
) -> String {
    let mut line = format!("{:03} {}", index + 1, action.name());
    if let Some(detail) = action_detail(action, controls) {
        line.push_str(&format!(" ({detail})"));
    }
    match (outcome, current) {
        (Outcome::Applied, Some((w, h))) => line.push_str(&format!(" → {w}x{h}")),
        (Outcome::Unchanged, _) => line.push_str(" → unchanged"),
        (Outcome::NoImage, _) => line.push_str(" → skipped (no image)"),
        (Outcome::Applied, None) => {}
    }
    line
}

pub fn format_saved(path: &Path, format: OutputFormat) -> String {
    format!("Saved {} ({format})", path.display())
}

/// The full control surface: selectors and slider ranges.
pub fn format_options() -> Vec<String> {
    let mut lines = vec!["Filters".to_string()];
    lines.extend(
        FilterKind::ALL
            .iter()
            .map(|k| format!("{INDENT}{}", k.label())),
    );
    lines.push("Formats".to_string());
    lines.extend(
        OutputFormat::ALL
            .iter()
            .map(|f| format!("{INDENT}{} (.{})", f.label(), f.extension())),
    );
    lines.push("Sliders".to_string());
    lines.push(format!(
        "{INDENT}width, height: {}-{}",
        DIMENSION_RANGE.start(),
        DIMENSION_RANGE.end()
    ));
    lines.push(format!(
        "{INDENT}brightness, contrast: {}-{} (default {NEUTRAL_LEVEL})",
        LEVEL_RANGE.start(),
        LEVEL_RANGE.end()
    ));
    lines
}

pub fn print_options() {
    for line in format_options() {
        println!("{line}");
    }
}

/// Write a preview bitmap out as a PNG.
pub fn write_preview(bitmap: &DisplayBitmap, path: &Path) -> Result<(), image::ImageError> {
    bitmap
        .to_image()
        .save_with_format(path, image::ImageFormat::Png)
}

pub fn format_preview_written(path: &Path, bitmap: &DisplayBitmap) -> String {
    format!(
        "Preview {} ({}x{})",
        path.display(),
        bitmap.width(),
        bitmap.height()
    )
}
