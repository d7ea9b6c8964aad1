//! # Simple Retouch
//!
//! A small single-image editor core: load a picture, resize it, run one of a
//! handful of classic filters, nudge brightness and contrast, then save or
//! convert it. The library holds all editing state and logic; a front end
//! (the bundled CLI, or a GUI) only collects control values and paints the
//! preview bitmap it is handed.
//!
//! # Architecture: Session, Editor, Preview
//!
//! ```text
//! front end ──Action + ControlValues──▶ Editor ──▶ ImageSession ──▶ imaging
//!     ▲                                   │
//!     └────────── DisplayBitmap ◀─────────┘
//! ```
//!
//! - [`session::ImageSession`] owns the *original* image (as loaded) and the
//!   *current* image (every edit so far). Each edit replaces the current
//!   image with a new one derived from it; the original is only replaced by
//!   another load.
//! - [`editor::Editor`] maps one user action to one session operation,
//!   reading only the controls that action needs, and rebuilds the preview
//!   when the current image changed.
//! - [`display::to_display_bitmap`] is the one pure conversion from an image
//!   of any pixel mode to a packed RGB bitmap that fits the viewport.
//!
//! Edits before anything is loaded are silent no-ops
//! ([`session::Outcome::NoImage`]), never errors. Load and save failures are
//! typed errors that leave the session exactly as it was.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`controls`] | Control surface: slider ranges, filter and format selectors, [`controls::ControlValues`] |
//! | [`session`] | Image state holder: load, resize, filter, adjust, revert, export, save |
//! | [`editor`] | Action dispatch and preview refresh; textual edit steps for the CLI |
//! | [`display`] | Current image → viewport-sized RGB bitmap |
//! | [`imaging`] | Pure-Rust decode, encode, resize, convolution filters, level mapping |
//! | [`config`] | `retouch.toml` loading, merging onto stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Imaging
//!
//! Everything goes through the `image` crate: decoding and encoding all five
//! formats, Catmull-Rom resizing, 3×3 convolution, and the typed pixel
//! buffers the 5×5 blur and level mapping run over. No system libraries, so
//! the binary runs anywhere it builds.
//!
//! ## Encode Before Write
//!
//! Exports are encoded into memory and only then written to disk. An image
//! the target format cannot hold (an RGBA image as JPEG) fails with
//! [`imaging::SaveError`] and leaves no partial file behind.
//!
//! ## Pixel Mode Is Preserved
//!
//! Filters and adjustments operate on the image in its own mode: a
//! grayscale image stays grayscale, 16-bit stays 16-bit, alpha is carried
//! through untouched. Only the preview bitmap is canonicalized to RGB.

pub mod config;
pub mod controls;
pub mod display;
pub mod editor;
pub mod imaging;
pub mod output;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;
