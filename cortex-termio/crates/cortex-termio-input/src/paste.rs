//! Bracketed paste decoding.
//!
//! Paste tracking is an explicit value: a [`PasteState`] goes into every
//! [`process_paste_buffer`] call and comes back out, updated, in the
//! returned [`PasteStep`]. Several independent input streams can therefore be
//! decoded side by side, and any intermediate state can be constructed
//! directly in tests.
//!
//! A paste is only entered when a chunk *begins* with the start marker. A
//! marker that follows ordinary text in the same chunk is not recognized;
//! transports are expected to deliver paste markers at chunk boundaries.

use crate::sanitize::sanitize_pasted_text;
use crate::sequences::{PASTE_END, PASTE_START};
use std::borrow::Cow;
use tracing::{debug, warn};

// ============================================================================
// Types
// ============================================================================

/// Progress of a bracketed paste.
///
/// This describes what happened during one decode step. `text` is only set
/// once the end marker has been seen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasteEvent {
    /// The start marker was consumed in this step.
    pub paste_started: bool,
    /// The end marker was consumed in this step.
    pub paste_ended: bool,
    /// Complete paste content, available when `paste_ended` is true.
    pub text: Option<String>,
}

/// Result of one [`process_paste_buffer`] step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteStep<'a> {
    /// Updated state to pass into the next step.
    pub state: PasteState,
    /// Paste progress, `None` when the chunk was not paste input.
    pub event: Option<PasteEvent>,
    /// Unconsumed bytes of the input chunk.
    pub remaining: &'a [u8],
}

/// Resumable bracketed-paste state for one input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteState {
    is_pasting: bool,
    buffer: Vec<u8>,
    max_length: usize,
    sanitize: bool,
    /// Trailing bytes that may be the beginning of a split end marker.
    held: Vec<u8>,
    /// Characters in `buffer`, tracked only when `max_length` is set.
    chars: usize,
    /// Continuation bytes still expected by the last lead byte.
    pending: u8,
    /// Accepted range for the next continuation byte.
    next: (u8, u8),
    truncated: bool,
}

impl Default for PasteState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PasteState {
    /// Creates an idle state. `max_length` counts characters, `0` is unlimited.
    #[must_use]
    pub fn new(max_length: usize) -> Self {
        Self {
            is_pasting: false,
            buffer: Vec::new(),
            max_length,
            sanitize: true,
            held: Vec::new(),
            chars: 0,
            pending: 0,
            next: CONTINUATION,
            truncated: false,
        }
    }

    /// Creates a state that is already inside a paste with `buffer` accumulated.
    ///
    /// The buffer is capped at `max_length` characters.
    #[must_use]
    pub fn pasting(buffer: impl AsRef<[u8]>, max_length: usize) -> Self {
        let mut state = Self::new(max_length);
        state.is_pasting = true;
        state.append(buffer.as_ref());
        state
    }

    /// Sets whether completed paste text is sanitized (default: true).
    #[must_use]
    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    /// Returns true while between the start and end markers.
    pub fn is_pasting(&self) -> bool {
        self.is_pasting
    }

    /// Content accumulated so far.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Configured maximum length in characters, `0` for unlimited.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns true if content has been dropped because of `max_length`.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Returns true if completed paste text will be sanitized.
    pub fn sanitizes(&self) -> bool {
        self.sanitize
    }

    /// Returns an idle state with the same configuration.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::new(self.max_length).with_sanitize(self.sanitize)
    }

    /// Appends content, stopping at the character limit.
    ///
    /// Characters are counted the way lossy UTF-8 decoding will render them:
    /// a well-formed sequence is one character, and so is every maximal
    /// ill-formed subsequence, including a lone continuation byte. The cut
    /// is made in front of a new character, so a multi-byte character is
    /// never split. The decoder position carries over between chunks.
    fn append(&mut self, bytes: &[u8]) {
        if self.max_length == 0 {
            self.buffer.extend_from_slice(bytes);
            return;
        }
        if self.truncated {
            return;
        }

        let mut cut = bytes.len();
        for (i, &byte) in bytes.iter().enumerate() {
            if self.pending > 0 && (self.next.0..=self.next.1).contains(&byte) {
                self.pending -= 1;
                self.next = CONTINUATION;
                continue;
            }
            if self.chars == self.max_length {
                cut = i;
                self.truncated = true;
                break;
            }
            self.chars += 1;
            (self.pending, self.next) = sequence_after(byte);
        }
        self.buffer.extend_from_slice(&bytes[..cut]);

        if self.truncated {
            warn!(
                max_length = self.max_length,
                "paste exceeds maximum length, truncating"
            );
        }
    }
}

const CONTINUATION: (u8, u8) = (0x80, 0xBF);

/// Continuation bytes expected after `lead`, and the range of the first one.
fn sequence_after(lead: u8) -> (u8, (u8, u8)) {
    match lead {
        0xC2..=0xDF => (1, CONTINUATION),
        0xE0 => (2, (0xA0, 0xBF)),
        0xE1..=0xEC | 0xEE..=0xEF => (2, CONTINUATION),
        0xED => (2, (0x80, 0x9F)),
        0xF0 => (3, (0x90, 0xBF)),
        0xF1..=0xF3 => (3, CONTINUATION),
        0xF4 => (3, (0x80, 0x8F)),
        _ => (0, CONTINUATION),
    }
}

// ============================================================================
// Marker search
// ============================================================================

/// Returns true iff `buf` begins with the complete paste start marker.
pub fn is_paste_start(buf: &[u8]) -> bool {
    buf.starts_with(PASTE_START)
}

/// Byte offset of the first paste end marker anywhere in `buf`.
pub fn find_paste_end(buf: &[u8]) -> Option<usize> {
    find(buf, PASTE_END)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Length of the longest suffix of `buf` that is a proper prefix of the end marker.
fn partial_end_marker(buf: &[u8]) -> usize {
    (1..PASTE_END.len())
        .rev()
        .find(|&len| buf.ends_with(&PASTE_END[..len]))
        .unwrap_or(0)
}

fn decode_text(bytes: &[u8], sanitize: bool) -> String {
    let text = String::from_utf8_lossy(bytes);
    if sanitize {
        sanitize_pasted_text(&text).into_owned()
    } else {
        text.into_owned()
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Scans a self-contained buffer for a paste and extracts its sanitized text.
///
/// Content starts after the start marker if there is one, otherwise at the
/// beginning of the buffer. `text` is `None` until an end marker is present.
pub fn extract_paste_content(buf: &[u8]) -> PasteEvent {
    extract_paste_content_with(buf, true)
}

/// [`extract_paste_content`] with sanitization under caller control.
pub fn extract_paste_content_with(buf: &[u8], sanitize: bool) -> PasteEvent {
    let start = find(buf, PASTE_START);
    let content = &buf[start.map_or(0, |pos| pos + PASTE_START.len())..];

    match find_paste_end(content) {
        Some(end) => PasteEvent {
            paste_started: start.is_some(),
            paste_ended: true,
            text: Some(decode_text(&content[..end], sanitize)),
        },
        None => PasteEvent {
            paste_started: start.is_some(),
            paste_ended: false,
            text: None,
        },
    }
}

/// Runs one resumable decode step over an input chunk.
///
/// - Idle and the chunk does not begin with the start marker: nothing is
///   consumed, `event` is `None` and `remaining` is the whole chunk.
/// - Otherwise content is accumulated (capped at `max_length`) until the end
///   marker. On the end marker the completed text is returned, the state is
///   reset and `remaining` holds whatever followed the marker.
/// - Without an end marker the whole chunk is consumed and the state stays in
///   pasting mode. An end marker split across chunks is still recognized.
pub fn process_paste_buffer(mut state: PasteState, buf: &[u8]) -> PasteStep<'_> {
    let mut started = false;
    let mut data = buf;

    if !state.is_pasting {
        if !is_paste_start(buf) {
            return PasteStep {
                state,
                event: None,
                remaining: buf,
            };
        }
        state.is_pasting = true;
        started = true;
        data = &buf[PASTE_START.len()..];
    }

    let held_len = state.held.len();
    let combined: Cow<'_, [u8]> = if held_len == 0 {
        Cow::Borrowed(data)
    } else {
        let mut joined = std::mem::take(&mut state.held);
        joined.extend_from_slice(data);
        Cow::Owned(joined)
    };

    if let Some(end) = find_paste_end(&combined) {
        state.append(&combined[..end]);
        let text = decode_text(&state.buffer, state.sanitize);
        debug!(
            bytes = state.buffer.len(),
            truncated = state.truncated,
            "bracketed paste complete"
        );

        // held bytes are a proper prefix of the marker, so it ends inside `data`
        let consumed = end + PASTE_END.len() - held_len;
        return PasteStep {
            state: state.reset(),
            event: Some(PasteEvent {
                paste_started: started,
                paste_ended: true,
                text: Some(text),
            }),
            remaining: &data[consumed..],
        };
    }

    let keep = partial_end_marker(&combined);
    let split = combined.len() - keep;
    state.append(&combined[..split]);
    state.held = combined[split..].to_vec();

    PasteStep {
        state,
        event: Some(PasteEvent {
            paste_started: started,
            paste_ended: false,
            text: None,
        }),
        remaining: &[],
    }
}
