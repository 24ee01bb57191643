//! Color engine for `Cortex Termio`.
//!
//! Exact, documented conversions between the color representations a terminal
//! understands, and nearest-color quantization into the xterm 256-color palette.
//!
//! - [`rgb`]: RGB, HSL, hex and packed truecolor conversions
//! - [`palette`]: the 256-color palette and quantization searches
//! - [`sgr`]: SGR parameter strings for palette and truecolor output
//! - [`value`]: the [`ColorValue`] union and its dispatchers
//! - [`error`]: structural validation errors
//!
//! # Examples
//!
//! ```
//! use cortex_termio_color::{hex_to_rgb, rgb_to_color256, fg_256, sgr};
//!
//! let orange = hex_to_rgb("#FF8000").unwrap();
//! let index = rgb_to_color256(orange);
//! let escape = sgr(&[fg_256(index)]);
//! assert!(escape.starts_with("\x1b[38;5;"));
//! ```
//!
//! Textual input goes through the dispatcher:
//!
//! ```
//! use cortex_termio_color::{parse_color, to_hex};
//!
//! let value = parse_color("rgb(300, 0, 0)").unwrap();
//! assert_eq!(to_hex(&value).unwrap(), "#FF0000");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::match_same_arms)]

pub mod error;
pub mod palette;
pub mod rgb;
pub mod sgr;
pub mod value;

// Re-export commonly used items at the crate root for convenience
pub use error::{ColorError, Result};
pub use palette::{
    color256_to_rgb, rgb_to_ansi16, rgb_to_color256, rgb_to_color_cube, rgb_to_grayscale256,
    ANSI_16, CUBE_LEVELS,
};
pub use rgb::{
    hex_to_rgb, hsl_to_rgb, rgb_to_hex, rgb_to_hsl, rgb_to_truecolor, truecolor_to_rgb, Hsl, Rgb,
    TRUECOLOR_MAX,
};
pub use sgr::{bg_256, bg_truecolor, fg_256, fg_truecolor, sgr, SGR_RESET};
pub use value::{parse_color, to_color256, to_hex, to_hsl, to_rgb, to_truecolor, ColorValue};
