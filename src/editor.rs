//! Action dispatch: one UI action → one session operation → preview refresh.
//!
//! An [`Editor`] is what a front end talks to. Each button maps to an
//! [`Action`]; the front end snapshots its controls into a
//! [`ControlValues`] and calls [`Editor::dispatch`]. The editor reads only
//! the controls that action needs, runs exactly one
//! [`ImageSession`](crate::session::ImageSession) operation, and rebuilds the
//! preview when the current image changed. A failed action returns its error
//! and leaves the previous preview in place.
//!
//! [`Step`] is the textual form of "move some controls, then press a button",
//! used by the command line.

use crate::controls::{
    ControlError, ControlValues, DIMENSION_RANGE, FilterKind, LEVEL_RANGE, check_range,
};
use crate::display::{DisplayBitmap, Viewport, to_display_bitmap};
use crate::imaging::{ImageBackend, LoadError, RustBackend, SaveError};
use crate::session::{ImageSession, Outcome};
use image::DynamicImage;
use log::{debug, warn};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Default filename offered by the plain save action.
pub const DEFAULT_SAVE_NAME: &str = "manipulated_image.png";

#[derive(Error, Debug)]
pub enum EditError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// A UI action. Paths come from the front end's file dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Load(PathBuf),
    Resize,
    ApplyFilter,
    ConvertFormat(PathBuf),
    Adjust,
    Save(PathBuf),
    Revert,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Load(_) => "load",
            Action::Resize => "resize",
            Action::ApplyFilter => "apply filter",
            Action::ConvertFormat(_) => "convert format",
            Action::Adjust => "adjust",
            Action::Save(_) => "save",
            Action::Revert => "revert",
        }
    }

    /// Whether a successful run replaces the current image.
    fn changes_current(&self) -> bool {
        !matches!(self, Action::ConvertFormat(_) | Action::Save(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Load(p) | Action::ConvertFormat(p) | Action::Save(p) => {
                write!(f, "{} {}", self.name(), p.display())
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Session plus the preview derived from its current image.
pub struct Editor<B: ImageBackend = RustBackend> {
    session: ImageSession<B>,
    viewport: Viewport,
    preview: Option<DisplayBitmap>,
}

impl Default for Editor<RustBackend> {
    fn default() -> Self {
        Self::new(ImageSession::default(), Viewport::default())
    }
}

impl<B: ImageBackend> Editor<B> {
    pub fn new(session: ImageSession<B>, viewport: Viewport) -> Self {
        Self {
            session,
            viewport,
            preview: None,
        }
    }

    pub fn session(&self) -> &ImageSession<B> {
        &self.session
    }

    pub fn current(&self) -> Option<&DynamicImage> {
        self.session.current()
    }

    pub fn preview(&self) -> Option<&DisplayBitmap> {
        self.preview.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// `base` with the size sliders moved to the current image's dimensions,
    /// as the widgets do right after a load.
    pub fn suggested_controls(&self, base: ControlValues) -> ControlValues {
        match self.session.current() {
            Some(img) => base.with_dimensions(img.width(), img.height()),
            None => base,
        }
    }

    /// Run one action against the session using the given control snapshot.
    pub fn dispatch(
        &mut self,
        action: &Action,
        controls: &ControlValues,
    ) -> Result<Outcome, EditError> {
        let outcome = match action {
            Action::Load(path) => {
                self.session.load(path)?;
                Outcome::Applied
            }
            Action::Resize => self.session.resize(controls.width, controls.height),
            Action::ApplyFilter => self.session.apply_filter(controls.filter),
            Action::Adjust => self
                .session
                .adjust(controls.brightness_factor(), controls.contrast_factor()),
            Action::Revert => self.session.revert(),
            Action::ConvertFormat(path) => self.session.export(path, controls.format)?,
            Action::Save(path) => self.session.save(path)?,
        };

        match outcome {
            Outcome::Applied if action.changes_current() => self.refresh_preview(),
            Outcome::NoImage => warn!("{action}: no image loaded"),
            _ => {}
        }
        debug!("{action}: {outcome:?}");
        Ok(outcome)
    }

    fn refresh_preview(&mut self) {
        self.preview = self
            .session
            .current()
            .map(|img| to_display_bitmap(img, self.viewport));
    }
}

// ============================================================================
// Steps
// ============================================================================

/// One command-line edit: set the relevant controls, then trigger the action.
///
/// | Text | Effect |
/// |---|---|
/// | `resize=WxH` | size sliders to W, H; Resize |
/// | `filter=NAME` | filter selector to NAME; Apply Filter |
/// | `adjust=B,C` | brightness/contrast sliders to B, C; Adjust |
/// | `revert` | Revert |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Resize { width: u32, height: u32 },
    Filter(FilterKind),
    Adjust { brightness: u32, contrast: u32 },
    Revert,
}

impl Step {
    /// Update `controls` the way the widgets would and name the action to run.
    pub fn apply(self, controls: ControlValues) -> (Action, ControlValues) {
        match self {
            Step::Resize { width, height } => (
                Action::Resize,
                ControlValues {
                    width,
                    height,
                    ..controls
                },
            ),
            Step::Filter(filter) => (Action::ApplyFilter, ControlValues { filter, ..controls }),
            Step::Adjust {
                brightness,
                contrast,
            } => (
                Action::Adjust,
                controls.with_levels(brightness, contrast),
            ),
            Step::Revert => (Action::Revert, controls),
        }
    }
}

fn parse_pair(s: &str, sep: char) -> Option<(u32, u32)> {
    let (a, b) = s.split_once(sep)?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

impl FromStr for Step {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| ControlError::InvalidStep(s.to_string(), why.to_string());
        let (name, arg) = match s.split_once('=') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };

        match (name.to_ascii_lowercase().as_str(), arg) {
            ("resize", Some(arg)) => {
                let (w, h) = parse_pair(&arg.to_ascii_lowercase(), 'x')
                    .ok_or_else(|| invalid("expected resize=WIDTHxHEIGHT"))?;
                Ok(Step::Resize {
                    width: check_range("width", w, &DIMENSION_RANGE)?,
                    height: check_range("height", h, &DIMENSION_RANGE)?,
                })
            }
            ("filter", Some(arg)) => Ok(Step::Filter(arg.parse()?)),
            ("adjust", Some(arg)) => {
                let (b, c) = parse_pair(arg, ',')
                    .ok_or_else(|| invalid("expected adjust=BRIGHTNESS,CONTRAST"))?;
                Ok(Step::Adjust {
                    brightness: check_range("brightness", b, &LEVEL_RANGE)?,
                    contrast: check_range("contrast", c, &LEVEL_RANGE)?,
                })
            }
            ("revert", None) => Ok(Step::Revert),
            ("resize" | "filter" | "adjust", None) => Err(invalid("missing value after '='")),
            ("revert", Some(_)) => Err(invalid("revert takes no value")),
            _ => Err(invalid("unknown step; use resize, filter, adjust or revert")),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Resize { width, height } => write!(f, "resize={width}x{height}"),
            Step::Filter(kind) => write!(f, "filter={kind}"),
            Step::Adjust {
                brightness,
                contrast,
            } => write!(f, "adjust={brightness},{contrast}"),
            Step::Revert => f.write_str("revert"),
        }
    }
}
