//! Terminal capability resolution for `Cortex Termio`.
//!
//! A fixed table of built-in terminfo-style profiles with name-based fallback,
//! parameter expansion for capability templates, and alternate character set
//! mapping.
//!
//! - [`builtin`]: the profile table and the lookup functions
//! - [`capabilities`]: the [`TerminalCapabilities`] record and its builder
//! - [`tparm`]: `%`-language expansion of parameterized strings
//! - [`acs`]: ACS names, Unicode box drawing and ASCII degradation
//!
//! # Examples
//!
//! ```
//! use cortex_termio_terminfo::get_best_builtin_terminfo;
//!
//! let caps = get_best_builtin_terminfo("xterm-256color-italic");
//! assert_eq!(caps.name, "xterm-256color");
//! assert_eq!(caps.cursor_address(0, 0).unwrap(), "\x1b[1;1H");
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
#![allow(clippy::too_many_lines)]

pub mod acs;
pub mod builtin;
pub mod capabilities;
pub mod error;
pub mod tparm;

pub use acs::{
    acs_code, acs_code_to_unicode, acs_name_for, acs_to_unicode, acs_unicode_map,
    contains_box_drawing, is_box_drawing_char, parse_acsc, string_to_ascii, unicode_to_ascii,
};
pub use builtin::{
    builtin_profiles, builtin_terminal_names, get_best_builtin_terminfo, get_builtin_terminfo,
    has_builtin_terminfo, DEFAULT_TERMINAL,
};
pub use capabilities::{CapabilitiesBuilder, TerminalCapabilities};
pub use error::{Result, TparmError};
pub use tparm::{tparm, Param};
