//! Terminal focus reports (`ESC [ I` / `ESC [ O`).

use crate::sequences::{FOCUS_IN, FOCUS_OUT};

/// The terminal window gained or lost focus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusEvent {
    /// True for focus in, false for focus out.
    pub focused: bool,
    /// The exact bytes of the report.
    pub raw: Vec<u8>,
}

/// Parses a focus report at the start of `buf`.
pub fn parse_focus_event(buf: &[u8]) -> Option<FocusEvent> {
    let focused = if buf.starts_with(FOCUS_IN) {
        true
    } else if buf.starts_with(FOCUS_OUT) {
        false
    } else {
        return None;
    };
    Some(FocusEvent {
        focused,
        raw: buf[..FOCUS_IN.len()].to_vec(),
    })
}
