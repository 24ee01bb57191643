//! Combined input decoding.
//!
//! [`decode_input`] is the single entry point a reader loop needs: it routes
//! paste traffic through the paste state machine and recognizes mouse and
//! focus reports, handing everything else back untouched.

use crate::focus::{parse_focus_event, FocusEvent};
use crate::mouse::{parse_mouse_sequence, MouseEvent};
use crate::paste::{is_paste_start, process_paste_buffer, PasteEvent, PasteState};

/// A typed input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse report.
    Mouse(MouseEvent),
    /// Focus change.
    Focus(FocusEvent),
    /// Bracketed paste progress.
    Paste(PasteEvent),
}

impl InputEvent {
    /// Returns the completed paste text, if this event finished a paste.
    pub fn paste_text(&self) -> Option<&str> {
        match self {
            InputEvent::Paste(event) => event.text.as_deref(),
            _ => None,
        }
    }
}

/// Result of one [`decode_input`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeStep<'a> {
    /// State to pass into the next call.
    pub state: PasteState,
    /// Decoded event, `None` if nothing at the start of the chunk was recognized.
    pub event: Option<InputEvent>,
    /// Unconsumed bytes.
    pub remaining: &'a [u8],
}

/// Decodes at most one event from the start of `buf`.
///
/// While a paste is in progress every byte belongs to it. Otherwise the
/// chunk is checked for a paste start, then a mouse report, then a focus
/// report. Unrecognized input comes back in `remaining` with `event` unset
/// so the caller can hand it to a key parser or wait for more bytes.
pub fn decode_input(state: PasteState, buf: &[u8]) -> DecodeStep<'_> {
    if state.is_pasting() || is_paste_start(buf) {
        let step = process_paste_buffer(state, buf);
        return DecodeStep {
            state: step.state,
            event: step.event.map(InputEvent::Paste),
            remaining: step.remaining,
        };
    }

    if let Some(mouse) = parse_mouse_sequence(buf) {
        let consumed = mouse.raw.len();
        return DecodeStep {
            state,
            event: Some(InputEvent::Mouse(mouse)),
            remaining: &buf[consumed..],
        };
    }

    if let Some(focus) = parse_focus_event(buf) {
        let consumed = focus.raw.len();
        return DecodeStep {
            state,
            event: Some(InputEvent::Focus(focus)),
            remaining: &buf[consumed..],
        };
    }

    DecodeStep {
        state,
        event: None,
        remaining: buf,
    }
}
