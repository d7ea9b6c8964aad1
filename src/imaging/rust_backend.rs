//! Pure Rust codec backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, BMP, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Encode JPEG | `image::codecs::jpeg::JpegEncoder` at the configured quality |
//! | Encode PNG, BMP, TIFF, WebP | `DynamicImage::write_to` (WebP is lossless) |
//!
//! Encoding goes to an in-memory buffer first; the destination file is only
//! created once the encoder has accepted the image. JPEG has no alpha
//! channel, so images with alpha are refused rather than flattened.

use super::backend::{ImageBackend, LoadError, SaveError};
use super::params::Quality;
use crate::controls::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::error::{ImageFormatHint, UnsupportedError, UnsupportedErrorKind};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use log::debug;
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions offered by the open-file picker.
const PICKER_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("bmp", ImageFormat::Bmp),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PICKER_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Picker extensions whose decoders are compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Whether `path` would pass the open-file picker's extension filter.
pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Codec backend using the `image` crate's built-in decoders and encoders.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Encode into memory so a rejected image never produces a file.
fn encode_to_vec(
    image: &DynamicImage,
    format: OutputFormat,
    quality: Quality,
) -> Result<Vec<u8>, SaveError> {
    if format == OutputFormat::Jpeg && image.color().has_alpha() {
        let source = ImageError::Unsupported(UnsupportedError::from_format_and_kind(
            ImageFormatHint::Exact(ImageFormat::Jpeg),
            UnsupportedErrorKind::Color(image.color().into()),
        ));
        return Err(SaveError::Encode { format, source });
    }

    let mut buf = Cursor::new(Vec::new());
    let result = match format {
        OutputFormat::Jpeg => {
            // quality is clamped to 1-100 on construction
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality.value() as u8);
            image.write_with_encoder(encoder)
        }
        other => image.write_to(&mut buf, other.image_format()),
    };
    result.map_err(|source| SaveError::Encode { format, source })?;
    Ok(buf.into_inner())
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, LoadError> {
        let io_err = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };
        let image = ImageReader::open(path)
            .map_err(io_err)?
            .with_guessed_format()
            .map_err(io_err)?
            .decode()
            .map_err(|source| LoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "decoded {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            image.color()
        );
        Ok(image)
    }

    fn encode(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
        path: &Path,
    ) -> Result<(), SaveError> {
        let bytes = encode_to_vec(image, format, quality)?;
        std::fs::write(path, &bytes).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "wrote {} as {} ({} bytes)",
            path.display(),
            format,
            bytes.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gradient_rgb, gradient_rgba, write_png};

    #[test]
    fn supported_extensions_cover_picker_list() {
        let exts = supported_input_extensions();
        for expected in &["png", "jpg", "bmp", "tiff", "webp"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
    }

    #[test]
    fn picker_filter_is_case_insensitive() {
        assert!(is_supported_input(Path::new("photo.PNG")));
        assert!(is_supported_input(Path::new("dir/photo.webp")));
        assert!(!is_supported_input(Path::new("photo.gif")));
        assert!(!is_supported_input(Path::new("photo")));
    }

    #[test]
    fn decode_synthetic_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_png(tmp.path(), "source.png", &gradient_rgb(40, 30));

        let img = RustBackend::new().decode(&path).unwrap();
        assert_eq!((img.width(), img.height()), (40, 30));
    }

    #[test]
    fn decode_sniffs_content_over_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let png = write_png(tmp.path(), "source.png", &gradient_rgb(12, 8));
        let misnamed = tmp.path().join("actually-png.jpg");
        std::fs::rename(&png, &misnamed).unwrap();

        let img = RustBackend::new().decode(&misnamed).unwrap();
        assert_eq!((img.width(), img.height()), (12, 8));
    }

    #[test]
    fn decode_nonexistent_file_is_io_error() {
        let result = RustBackend::new().decode(Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("corrupt.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really a png").unwrap();

        let result = RustBackend::new().decode(&path);
        assert!(matches!(result, Err(LoadError::Decode { .. })));
    }

    #[test]
    fn lossless_formats_roundtrip_dimensions_and_pixels() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = RustBackend::new();
        let img = gradient_rgb(33, 21);

        for format in [OutputFormat::Png, OutputFormat::Bmp, OutputFormat::Tiff] {
            let path = tmp.path().join(format!("out.{}", format.extension()));
            backend
                .encode(&img, format, Quality::default(), &path)
                .unwrap();
            let back = backend.decode(&path).unwrap();
            assert_eq!((back.width(), back.height()), (33, 21), "{format}");
            assert_eq!(back.to_rgb8(), img.to_rgb8(), "{format}");
        }
    }

    #[test]
    fn lossy_formats_roundtrip_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = RustBackend::new();
        let img = gradient_rgb(64, 48);

        for format in [OutputFormat::Jpeg, OutputFormat::WebP] {
            let path = tmp.path().join(format!("out.{}", format.extension()));
            backend
                .encode(&img, format, Quality::default(), &path)
                .unwrap();
            let back = backend.decode(&path).unwrap();
            assert_eq!((back.width(), back.height()), (64, 48), "{format}");
        }
    }

    #[test]
    fn jpeg_quality_changes_output_size() {
        let img = gradient_rgb(128, 128);
        let low = encode_to_vec(&img, OutputFormat::Jpeg, Quality::new(10)).unwrap();
        let high = encode_to_vec(&img, OutputFormat::Jpeg, Quality::new(95)).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn rgba_to_jpeg_is_rejected_without_writing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.jpeg");

        let result = RustBackend::new().encode(
            &gradient_rgba(20, 20),
            OutputFormat::Jpeg,
            Quality::default(),
            &path,
        );

        assert!(matches!(
            result,
            Err(SaveError::Encode {
                format: OutputFormat::Jpeg,
                ..
            })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn any_alpha_mode_to_jpeg_is_unsupported_color() {
        let gray_alpha = DynamicImage::ImageLumaA8(gradient_rgba(12, 12).to_luma_alpha8());

        let err = encode_to_vec(&gray_alpha, OutputFormat::Jpeg, Quality::default()).unwrap_err();

        let SaveError::Encode { format, source } = err else {
            panic!("expected an encode error, got {err:?}");
        };
        assert_eq!(format, OutputFormat::Jpeg);
        assert!(matches!(source, ImageError::Unsupported(_)));
    }

    #[test]
    fn alpha_kept_by_formats_that_carry_it() {
        let img = gradient_rgba(16, 16);
        for format in [OutputFormat::Png, OutputFormat::Tiff, OutputFormat::WebP] {
            let bytes = encode_to_vec(&img, format, Quality::default()).unwrap();
            let back = image::load_from_memory(&bytes).unwrap();
            assert!(back.color().has_alpha(), "{format}");
        }
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("missing-dir").join("out.png");

        let result = RustBackend::new().encode(
            &gradient_rgb(10, 10),
            OutputFormat::Png,
            Quality::default(),
            &path,
        );
        assert!(matches!(result, Err(SaveError::Io { .. })));
    }
}
