//! Image processing on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (PNG, JPEG, BMP, TIFF, WebP) |
//! | **Encode** | `DynamicImage::write_to`, `JpegEncoder` for quality control |
//! | **Resize** | `resize_exact` with Catmull-Rom |
//! | **Filters** | 5×5 ring convolution, `filter3x3`, `invert` |
//! | **Brightness / contrast** | per-channel level mapping |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and level math (unit testable)
//! - **Parameters**: Quality, adjustment factors, convolution kernels
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] for decode/encode
//! - **Operations**: Pure pixel transforms on `DynamicImage`

pub mod backend;
pub(crate) mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{ImageBackend, LoadError, SaveError};
pub use operations::{adjust, adjust_brightness, adjust_contrast, apply_filter, resize_exact};
pub use params::{Adjustment, Kernel3x3, Kernel5x5, Quality};
pub use rust_backend::{RustBackend, is_supported_input, supported_input_extensions};
