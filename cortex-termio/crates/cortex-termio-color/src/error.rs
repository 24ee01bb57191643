//! Error types for color conversion.

use thiserror::Error;

/// Structural failure while parsing or converting a color value.
///
/// Out-of-range numeric channels are never reported here: they are clamped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Input string was empty.
    #[error("empty color input")]
    Empty,

    /// Hex string had an invalid length.
    #[error("invalid hex length: {0} (expected 3, 6, or 8)")]
    InvalidHexLength(usize),

    /// Invalid hexadecimal character.
    #[error("invalid hex character: {0:?}")]
    InvalidHexChar(char),

    /// The input did not match any known color notation.
    #[error("unrecognized color format: {0}")]
    InvalidFormat(String),

    /// A packed truecolor value did not fit in 24 bits.
    #[error("truecolor value out of range: {0:#x}")]
    TruecolorOutOfRange(u32),

    /// A palette index was outside 0-255.
    #[error("256-color index out of range: {0}")]
    Color256OutOfRange(i64),
}

/// Result type alias for color operations.
pub type Result<T> = std::result::Result<T, ColorError>;
