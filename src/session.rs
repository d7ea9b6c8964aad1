//! The image state holder.
//!
//! An [`ImageSession`] owns two images once something has been loaded:
//!
//! - **original**: exactly what was decoded. Never modified; replaced
//!   wholesale by the next [`load`](ImageSession::load).
//! - **current**: the working copy. Every transform reads it and replaces it
//!   with its output, so edits accumulate: resizing twice resizes the already
//!   resized image, blurring twice blurs twice.
//!
//! Only [`revert`](ImageSession::revert) goes back to the original, and only
//! when asked. There is no undo history.
//!
//! Before the first successful load every operation is a silent no-op that
//! reports [`Outcome::NoImage`]. Decode and encode failures come back as
//! [`LoadError`] / [`SaveError`] and never disturb the images already held.

use crate::controls::{FilterKind, OutputFormat};
use crate::imaging::{
    Adjustment, ImageBackend, LoadError, Quality, RustBackend, SaveError, operations,
};
use image::DynamicImage;
use log::debug;
use std::path::{Path, PathBuf};

/// What an operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The current image was replaced or a file was written.
    Applied,
    /// Valid request with nothing to do (e.g. "No Filter").
    Unchanged,
    /// Skipped because no image has been loaded.
    NoImage,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

#[derive(Debug, Clone)]
struct Loaded {
    path: PathBuf,
    original: DynamicImage,
    current: DynamicImage,
}

/// Original/current image pair plus the codec backend used to load and save.
pub struct ImageSession<B: ImageBackend = RustBackend> {
    backend: B,
    jpeg_quality: Quality,
    loaded: Option<Loaded>,
}

impl Default for ImageSession<RustBackend> {
    fn default() -> Self {
        Self::new(RustBackend::new())
    }
}

impl<B: ImageBackend> ImageSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            jpeg_quality: Quality::default(),
            loaded: None,
        }
    }

    pub fn with_jpeg_quality(mut self, quality: Quality) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn current(&self) -> Option<&DynamicImage> {
        self.loaded.as_ref().map(|l| &l.current)
    }

    pub fn original(&self) -> Option<&DynamicImage> {
        self.loaded.as_ref().map(|l| &l.original)
    }

    /// Path the current pair was loaded from.
    pub fn source_path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    /// Decode `path` and make it both the original and the current image.
    ///
    /// On failure the previously loaded pair (if any) is kept.
    pub fn load(&mut self, path: &Path) -> Result<&DynamicImage, LoadError> {
        let original = self.backend.decode(path)?;
        let current = original.clone();
        debug!(
            "loaded {} ({}x{})",
            path.display(),
            current.width(),
            current.height()
        );
        let loaded = self.loaded.insert(Loaded {
            path: path.to_path_buf(),
            original,
            current,
        });
        Ok(&loaded.current)
    }

    /// Replace the current image with `f(current)` when it returns `Some`.
    fn transform(
        &mut self,
        op: &str,
        f: impl FnOnce(&DynamicImage) -> Option<DynamicImage>,
    ) -> Outcome {
        let Some(loaded) = self.loaded.as_mut() else {
            debug!("{op}: no image loaded, skipping");
            return Outcome::NoImage;
        };
        match f(&loaded.current) {
            Some(next) => {
                debug!("{op}: current is now {}x{}", next.width(), next.height());
                loaded.current = next;
                Outcome::Applied
            }
            None => Outcome::Unchanged,
        }
    }

    /// Stretch or shrink the current image to exactly `width` × `height`.
    ///
    /// The slider range (10–2000) is the caller's contract and is not
    /// re-checked here.
    pub fn resize(&mut self, width: u32, height: u32) -> Outcome {
        self.transform("resize", |img| {
            Some(operations::resize_exact(img, width, height))
        })
    }

    /// Apply one canned filter to the current image. `FilterKind::None` does nothing.
    pub fn apply_filter(&mut self, kind: FilterKind) -> Outcome {
        self.transform(kind.label(), |img| operations::apply_filter(img, kind))
    }

    /// Brightness, then contrast, as multipliers (1.0 = unchanged).
    pub fn adjust(&mut self, brightness: f32, contrast: f32) -> Outcome {
        self.transform("adjust", |img| {
            Some(operations::adjust(img, Adjustment::new(brightness, contrast)))
        })
    }

    /// Throw away all edits and start again from the original.
    pub fn revert(&mut self) -> Outcome {
        let Some(loaded) = self.loaded.as_mut() else {
            return Outcome::NoImage;
        };
        loaded.current = loaded.original.clone();
        debug!("revert: current restored from {}", loaded.path.display());
        Outcome::Applied
    }

    /// Encode the current image as `format` and write it to `path`.
    ///
    /// Encoder rejections (an alpha channel sent to JPEG, a bit depth the
    /// format cannot hold) are returned as-is; nothing is converted to make
    /// the encoder happy.
    pub fn export(&self, path: &Path, format: OutputFormat) -> Result<Outcome, SaveError> {
        let Some(loaded) = &self.loaded else {
            debug!("export: no image loaded, skipping");
            return Ok(Outcome::NoImage);
        };
        self.backend
            .encode(&loaded.current, format, self.jpeg_quality, path)?;
        debug!("export: wrote {} as {format}", path.display());
        Ok(Outcome::Applied)
    }

    /// Like [`export`](Self::export) with the format taken from `path`'s extension.
    pub fn save(&self, path: &Path) -> Result<Outcome, SaveError> {
        if !self.is_loaded() {
            debug!("save: no image loaded, skipping");
            return Ok(Outcome::NoImage);
        }
        let format = OutputFormat::from_path(path)
            .ok_or_else(|| SaveError::UnknownFormat(path.to_path_buf()))?;
        self.export(path, format)
    }
}
