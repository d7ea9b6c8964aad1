//! Tool configuration.
//!
//! Handles loading, validating, and merging `retouch.toml`. Stock defaults
//! are the base layer; a user file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [preview]
//! width = 800          # Preview viewport width in pixels
//! height = 600         # Preview viewport height in pixels
//!
//! [controls]
//! brightness = 100     # Initial brightness slider (0-200, 100 = unchanged)
//! contrast = 100       # Initial contrast slider (0-200, 100 = unchanged)
//!
//! [output]
//! jpeg_quality = 75    # JPEG encoding quality (1-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::controls::{ControlValues, LEVEL_RANGE, check_range};
use crate::display::Viewport;
use crate::imaging::Quality;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "retouch.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `retouch.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetouchConfig {
    /// Preview viewport size.
    pub preview: PreviewConfig,
    /// Initial slider positions.
    pub controls: ControlsConfig,
    /// Encoder settings.
    pub output: OutputConfig,
}

impl RetouchConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview.width == 0 || self.preview.height == 0 {
            return Err(ConfigError::Validation(
                "preview.width and preview.height must be non-zero".into(),
            ));
        }
        for (key, value) in [
            ("controls.brightness", self.controls.brightness),
            ("controls.contrast", self.controls.contrast),
        ] {
            check_range(key, value, &LEVEL_RANGE)
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

/// Preview viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            width: viewport.width,
            height: viewport.height,
        }
    }
}

impl PreviewConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }
}

/// Slider positions the controls start at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlsConfig {
    pub brightness: u32,
    pub contrast: u32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        let controls = ControlValues::default();
        Self {
            brightness: controls.brightness,
            contrast: controls.contrast,
        }
    }
}

impl ControlsConfig {
    /// Initial control snapshot before anything is loaded.
    pub fn initial_controls(&self) -> ControlValues {
        ControlValues::default().with_levels(self.brightness, self.contrast)
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub jpeg_quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: Quality::default().value(),
        }
    }
}

impl OutputConfig {
    pub fn jpeg_quality(&self) -> Quality {
        Quality::new(self.jpeg_quality)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(RetouchConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<RetouchConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: RetouchConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is missing.
pub fn load_config(path: &Path) -> Result<RetouchConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `retouch.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Retouch Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Preview
# ---------------------------------------------------------------------------
[preview]
# The preview is scaled to fit inside this box, keeping its aspect ratio.
width = 800
height = 600

# ---------------------------------------------------------------------------
# Initial slider positions
# ---------------------------------------------------------------------------
[controls]
# 0-200. 100 leaves the image unchanged; the factor applied is value / 100.
brightness = 100
contrast = 100

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[output]
# JPEG quality (1 = smallest file, 100 = best quality).
jpeg_quality = 75
"##
}
