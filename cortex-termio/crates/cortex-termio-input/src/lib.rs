//! Input decoding for `Cortex Termio`.
//!
//! Turns raw terminal input bytes into typed events. Every function works on
//! plain byte slices and never fails on malformed input: anything it cannot
//! recognize is reported as "not recognized" and handed back to the caller.
//!
//! - [`paste`]: the resumable bracketed-paste state machine
//! - [`sanitize`]: escape stripping and character-based truncation of paste text
//! - [`mouse`]: SGR, X10 and URXVT mouse reports
//! - [`focus`]: focus in/out reports
//! - [`event`]: [`decode_input`], one step over all of the above
//! - [`sequences`]: the byte sequences involved and the mode switches that enable them
//!
//! # Examples
//!
//! ```
//! use cortex_termio_input::{process_paste_buffer, PasteState};
//!
//! let state = PasteState::new(0);
//! let step = process_paste_buffer(state, b"\x1b[200~hello ");
//! assert!(step.state.is_pasting());
//!
//! let step = process_paste_buffer(step.state, b"world\x1b[201~");
//! let text = step.event.and_then(|event| event.text);
//! assert_eq!(text.as_deref(), Some("hello world"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::match_same_arms)]

pub mod event;
pub mod focus;
pub mod mouse;
pub mod paste;
pub mod sanitize;
pub mod sequences;

#[cfg(test)]
mod tests;

// Re-export commonly used items at the crate root for convenience
pub use event::{decode_input, DecodeStep, InputEvent};
pub use focus::{parse_focus_event, FocusEvent};
pub use mouse::{
    is_mouse_buffer, parse_mouse_sequence, MouseAction, MouseButton, MouseEvent, MouseModifiers,
    MouseProtocol,
};
pub use paste::{
    extract_paste_content, extract_paste_content_with, find_paste_end, is_paste_start,
    process_paste_buffer, PasteEvent, PasteState, PasteStep,
};
pub use sanitize::{sanitize_pasted_text, truncate_paste};
