//! Image output for `Cortex Termio`.
//!
//! Picks one of five output backends from an environment snapshot and turns
//! RGBA images into the escape sequences that backend understands.
//!
//! Selection follows a strict priority, Kitty > iTerm2 > Sixel > ANSI >
//! Braille, with Braille as the guaranteed fallback.
//!
//! - [`env`]: the [`EnvSnapshot`] and detection heuristics
//! - [`backend`]: the [`Backend`] contract, [`ImageBackend`] and selection
//! - [`image`]: pixel buffers, placement and regions
//! - [`kitty`], [`iterm2`], [`sixel`]: graphics protocols
//! - [`ansi`], [`braille`]: character-cell rasterizers
//! - [`codec`]: base64 and PNG payload encoding
//!
//! # Examples
//!
//! ```
//! use cortex_termio_image::{select_backend, Backend, BackendOptions, EnvSnapshot, Image, Placement};
//!
//! let env = EnvSnapshot::from_pairs([("NO_COLOR", "1"), ("LANG", "en_US.UTF-8")]);
//! let backend = select_backend(&env, &BackendOptions::default());
//! assert_eq!(backend.name(), "braille");
//!
//! let image = Image::from_fn(4, 8, |_, _| [255, 255, 255, 255]).unwrap();
//! let out = backend.render(&image, &Placement::default()).unwrap();
//! assert!(out.contains('\u{28ff}'));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::match_same_arms)]

pub mod ansi;
pub mod backend;
pub mod braille;
pub mod codec;
pub mod env;
pub mod error;
pub mod image;
pub mod iterm2;
pub mod kitty;
pub mod sixel;

#[cfg(test)]
mod tests;

// Re-export commonly used items at the crate root for convenience
pub use ansi::{render_half_blocks, AnsiBackend};
pub use backend::{
    best_backend_kind, get_best_backend_name, select_backend, Backend, BackendCapabilities,
    BackendKind, BackendOptions, ImageBackend, TruecolorMode,
};
pub use braille::{render_braille, BrailleBackend};
pub use codec::{encode_base64, encode_png};
pub use env::EnvSnapshot;
pub use error::{ImageError, Result};
pub use image::{cursor_position, Dimension, Image, Placement, Region};
pub use iterm2::{encode_iterm2_file, ITerm2Backend, ITerm2Options};
pub use kitty::{clear_kitty, encode_kitty, KittyBackend};
pub use sixel::{encode_sixel, SixelBackend};
