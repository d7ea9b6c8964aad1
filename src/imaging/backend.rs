//! Image I/O backend trait and its error types.
//!
//! The [`ImageBackend`] trait is the boundary between the editing session and
//! the codecs: it decodes files into [`DynamicImage`]s and encodes them back
//! out. Pixel transforms never go through it; they are pure functions in
//! [`operations`](super::operations).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use the
//! recording [`MockBackend`](tests::MockBackend).

use super::params::Quality;
use crate::controls::OutputFormat;
use image::{DynamicImage, ImageError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to bring an image into the session.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode {}: {source}", path.display())]
    Decode { path: PathBuf, source: ImageError },
}

/// Failure to write the current image out.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{format} encoder rejected the image: {source}")]
    Encode {
        format: OutputFormat,
        source: ImageError,
    },
    #[error("Cannot infer an output format from {}", .0.display())]
    UnknownFormat(PathBuf),
}

/// Codec access for an editing session.
pub trait ImageBackend {
    /// Decode the file at `path`.
    fn decode(&self, path: &Path) -> Result<DynamicImage, LoadError>;

    /// Encode `image` as `format` and write it to `path`.
    ///
    /// Implementations must not leave a partial file behind when the encoder
    /// rejects the image.
    fn encode(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
        path: &Path,
    ) -> Result<(), SaveError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Backend that records calls instead of touching the filesystem.
    ///
    /// `decode` hands out clones of `image` (or fails when it is `None`);
    /// `encode` fails when `reject_encode` is set.
    #[derive(Default)]
    pub struct MockBackend {
        pub image: Option<DynamicImage>,
        pub reject_encode: bool,
        pub operations: RefCell<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Encode {
            path: String,
            format: OutputFormat,
            quality: u32,
            width: u32,
            height: u32,
        },
    }

    impl MockBackend {
        pub fn with_image(image: DynamicImage) -> Self {
            Self {
                image: Some(image),
                ..Self::default()
            }
        }

        pub fn rejecting_encode(image: DynamicImage) -> Self {
            Self {
                image: Some(image),
                reject_encode: true,
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path) -> Result<DynamicImage, LoadError> {
            self.operations
                .borrow_mut()
                .push(RecordedOp::Decode(path.to_string_lossy().to_string()));

            self.image.clone().ok_or_else(|| LoadError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no mock image"),
            })
        }

        fn encode(
            &self,
            image: &DynamicImage,
            format: OutputFormat,
            quality: Quality,
            path: &Path,
        ) -> Result<(), SaveError> {
            self.operations.borrow_mut().push(RecordedOp::Encode {
                path: path.to_string_lossy().to_string(),
                format,
                quality: quality.value(),
                width: image.width(),
                height: image.height(),
            });

            if self.reject_encode {
                return Err(SaveError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::with_image(DynamicImage::new_rgb8(4, 3));

        let img = backend.decode(Path::new("/test/image.png")).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/test/image.png"));
    }

    #[test]
    fn mock_without_image_fails_decode() {
        let backend = MockBackend::default();
        let err = backend.decode(Path::new("/missing.png")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/missing.png"));
    }

    #[test]
    fn mock_records_encode() {
        let backend = MockBackend::default();
        let img = DynamicImage::new_rgb8(20, 10);

        backend
            .encode(&img, OutputFormat::Jpeg, Quality::new(80), Path::new("/out.jpg"))
            .unwrap();

        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Encode {
                path: "/out.jpg".into(),
                format: OutputFormat::Jpeg,
                quality: 80,
                width: 20,
                height: 10,
            }]
        );
    }

    #[test]
    fn unknown_format_error_names_path() {
        let err = SaveError::UnknownFormat(PathBuf::from("out/image.gif"));
        assert_eq!(
            err.to_string(),
            "Cannot infer an output format from out/image.gif"
        );
    }
}
