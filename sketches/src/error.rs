//! Error types for the sketches dataset.
//!
//! Every failure is reported to the caller of the single access that caused
//! it; none of them leave the dataset in a different state.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for dataset construction and item access.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The `processed` directory holding the PNG masks does not exist.
    #[error("Mask directory not found: {path}")]
    MaskDirectoryNotFound {
        /// The expected mask directory path.
        path: PathBuf,
    },

    /// The `unprocessed` directory holding the JPEG images does not exist.
    ///
    /// Only reported when pairs are validated at construction time.
    #[error("Image directory not found: {path}")]
    ImageDirectoryNotFound {
        /// The expected image directory path.
        path: PathBuf,
    },

    /// Error when reading a directory fails.
    #[error("Failed to read directory: {path}")]
    DirectoryReadFailed {
        /// The directory path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A split manifest exists but could not be read.
    #[error("Failed to read split manifest: {path}")]
    ManifestReadFailed {
        /// The manifest path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The split label is not one of `train`, `val` or `test`.
    #[error("Unknown dataset split: {label}")]
    UnknownSplit {
        /// The label as given.
        label: String,
    },

    /// Error when a file has no stem (filename without extension).
    #[error("File has no stem: {path}")]
    NoFileStem {
        /// The file path without a stem.
        path: PathBuf,
    },

    /// A mask has no image with the same stem.
    #[error("No image {image} for mask {mask}")]
    MissingImage {
        /// The expected image path.
        image: PathBuf,
        /// The mask that has no partner.
        mask: PathBuf,
    },

    /// Error when opening or decoding an image file fails.
    #[error("Failed to open image: {path}")]
    ImageOpenFailed {
        /// The image file path that failed to open.
        path: PathBuf,
        /// The underlying image processing error.
        #[source]
        source: image::ImageError,
    },

    /// The mask PNG has no alpha channel to derive the foreground from.
    #[error("Mask has no alpha channel: {path}")]
    MissingAlphaChannel {
        /// The offending mask path.
        path: PathBuf,
    },

    /// The requested index is past the end of the dataset.
    #[error("Index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The dataset length.
        len: usize,
    },
}

impl DatasetError {
    /// Returns `true` when the error was caused by a file that does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::MaskDirectoryNotFound { .. }
            | Self::ImageDirectoryNotFound { .. }
            | Self::MissingImage { .. } => true,
            Self::ImageOpenFailed {
                source: image::ImageError::IoError(e),
                ..
            }
            | Self::DirectoryReadFailed { source: e, .. }
            | Self::ManifestReadFailed { source: e, .. } => {
                e.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

/// A specialized `Result` type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;
