//! Error types for image encoding.

use thiserror::Error;

/// Errors produced while building or encoding an image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Pixel buffer length does not match `width * height * 4`.
    #[error("pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    InvalidDimensions {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Actual buffer length in bytes.
        len: usize,
    },

    /// Width or height is zero.
    #[error("image has no pixels")]
    EmptyImage,

    /// Backend name not recognized.
    #[error("unknown image backend: {0}")]
    UnknownBackend(String),

    /// Truecolor mode not one of `auto`, `always`, `never`.
    #[error("unknown truecolor mode: {0}")]
    UnknownTruecolorMode(String),

    /// A codec failed to encode the image.
    #[error("image encoding failed: {0}")]
    Encode(String),
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;
