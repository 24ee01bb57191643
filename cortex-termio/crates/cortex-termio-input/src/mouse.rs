//! Mouse report decoding for the SGR, X10 and URXVT protocols.

use crate::focus::parse_focus_event;
use crate::sequences::{CSI, SGR_MOUSE_PREFIX, X10_MOUSE_PREFIX};
use bitflags::bitflags;
use std::fmt;

/// Longest parameter section accepted in an SGR or URXVT report.
const MAX_PARAMS_LEN: usize = 24;

const WHEEL_BIT: u16 = 64;
const MOTION_BIT: u16 = 32;
const EXTENDED_BIT: u16 = 128;
const MODIFIER_MASK: u16 = 0b0001_1100;

/// Mouse button reported by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Left mouse button (primary).
    #[default]
    Left,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (secondary).
    Right,
    /// Wheel scrolled up.
    WheelUp,
    /// Wheel scrolled down.
    WheelDown,
    /// Not recoverable from the report, e.g. an X10 release.
    Unknown,
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseButton::Left => write!(f, "left"),
            MouseButton::Middle => write!(f, "middle"),
            MouseButton::Right => write!(f, "right"),
            MouseButton::WheelUp => write!(f, "wheelUp"),
            MouseButton::WheelDown => write!(f, "wheelDown"),
            MouseButton::Unknown => write!(f, "unknown"),
        }
    }
}

/// What the mouse did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// A button was pressed down.
    Press,
    /// A button was released.
    Release,
    /// Motion, with or without a button held.
    Move,
    /// The wheel was scrolled.
    Wheel,
}

impl fmt::Display for MouseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseAction::Press => write!(f, "press"),
            MouseAction::Release => write!(f, "release"),
            MouseAction::Move => write!(f, "move"),
            MouseAction::Wheel => write!(f, "wheel"),
        }
    }
}

/// Wire format a mouse event was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseProtocol {
    /// `ESC [ < Cb ; Cx ; Cy M|m`
    Sgr,
    /// `ESC [ M` followed by three offset bytes.
    X10,
    /// `ESC [ Cb ; Cx ; Cy M`
    Urxvt,
}

impl fmt::Display for MouseProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseProtocol::Sgr => write!(f, "sgr"),
            MouseProtocol::X10 => write!(f, "x10"),
            MouseProtocol::Urxvt => write!(f, "urxvt"),
        }
    }
}

bitflags! {
    /// Modifier keys held during a mouse event.
    ///
    /// The bit values are the ones the terminal adds to the button code.
    ///
    /// ```
    /// use cortex_termio_input::MouseModifiers;
    ///
    /// let mods = MouseModifiers::from_bits_truncate(4 | 16);
    /// assert!(mods.contains(MouseModifiers::SHIFT | MouseModifiers::CTRL));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0100;
        /// Meta/Alt key.
        const META  = 0b0000_1000;
        /// Control key.
        const CTRL  = 0b0001_0000;
    }
}

/// A decoded mouse report. Coordinates are 0-indexed cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Button involved.
    pub button: MouseButton,
    /// Press, release, motion or wheel.
    pub action: MouseAction,
    /// Modifier keys.
    pub modifiers: MouseModifiers,
    /// Wire format.
    pub protocol: MouseProtocol,
    /// The exact bytes of the report.
    pub raw: Vec<u8>,
}

impl MouseEvent {
    /// Returns the position as a tuple (x, y).
    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// Returns true if the Control modifier was held.
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(MouseModifiers::CTRL)
    }

    /// Returns true if the Meta modifier was held.
    pub fn meta(&self) -> bool {
        self.modifiers.contains(MouseModifiers::META)
    }

    /// Returns true if the Shift modifier was held.
    pub fn shift(&self) -> bool {
        self.modifiers.contains(MouseModifiers::SHIFT)
    }

    /// Returns true for a button press.
    pub fn is_press(&self) -> bool {
        self.action == MouseAction::Press
    }

    /// Returns true for a button release.
    pub fn is_release(&self) -> bool {
        self.action == MouseAction::Release
    }

    /// Returns true for a wheel event.
    pub fn is_wheel(&self) -> bool {
        self.action == MouseAction::Wheel
    }
}

impl fmt::Display for MouseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})@({},{})",
            self.action, self.button, self.x, self.y
        )
    }
}

// ============================================================================
// Button code decoding
// ============================================================================

/// Splits a button code into button and action.
///
/// `released` is set for SGR reports ending in `m`, the only format that
/// names the released button.
fn decode_button(cb: u16, released: bool) -> (MouseButton, MouseAction) {
    let low = cb & 0b11;

    if cb & WHEEL_BIT != 0 {
        let button = match low {
            0 => MouseButton::WheelUp,
            1 => MouseButton::WheelDown,
            _ => MouseButton::Unknown,
        };
        return (button, MouseAction::Wheel);
    }

    let button = if cb & EXTENDED_BIT != 0 {
        MouseButton::Unknown
    } else {
        match low {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::Unknown,
        }
    };

    if released {
        (button, MouseAction::Release)
    } else if cb & MOTION_BIT != 0 {
        (button, MouseAction::Move)
    } else if low == 3 {
        (MouseButton::Unknown, MouseAction::Release)
    } else {
        (button, MouseAction::Press)
    }
}

fn build_event(
    cb: u16,
    x: u16,
    y: u16,
    released: bool,
    protocol: MouseProtocol,
    raw: &[u8],
) -> MouseEvent {
    let (button, action) = decode_button(cb, released);
    MouseEvent {
        x: x.saturating_sub(1),
        y: y.saturating_sub(1),
        button,
        action,
        modifiers: MouseModifiers::from_bits_truncate((cb & MODIFIER_MASK) as u8),
        protocol,
        raw: raw.to_vec(),
    }
}

/// Parses `Cb;Cx;Cy` up to a final byte accepted by `is_final`.
///
/// Returns the three numbers, the final byte and the index just past it.
fn parse_params(buf: &[u8], start: usize, is_final: fn(u8) -> bool) -> Option<([u16; 3], u8, usize)> {
    let mut values = [0u16; 3];
    let mut index = 0;
    let mut digits = 0;

    for (offset, &byte) in buf.get(start..)?.iter().enumerate().take(MAX_PARAMS_LEN) {
        match byte {
            b'0'..=b'9' => {
                values[index] = values[index]
                    .checked_mul(10)?
                    .checked_add(u16::from(byte - b'0'))?;
                digits += 1;
            }
            b';' if digits > 0 && index < 2 => {
                index += 1;
                digits = 0;
            }
            _ if is_final(byte) && digits > 0 && index == 2 => {
                return Some((values, byte, start + offset + 1));
            }
            _ => return None,
        }
    }
    None
}

// ============================================================================
// Protocol parsers
// ============================================================================

/// Parses an SGR report at the start of `buf`.
pub fn parse_sgr(buf: &[u8]) -> Option<MouseEvent> {
    if !buf.starts_with(SGR_MOUSE_PREFIX) {
        return None;
    }
    let ([cb, x, y], last, end) = parse_params(buf, SGR_MOUSE_PREFIX.len(), |b| {
        b == b'M' || b == b'm'
    })?;
    Some(build_event(cb, x, y, last == b'm', MouseProtocol::Sgr, &buf[..end]))
}

/// Parses an X10 report at the start of `buf`.
///
/// Bytes below 32 cannot occur in a well-formed report and are rejected.
pub fn parse_x10(buf: &[u8]) -> Option<MouseEvent> {
    if !buf.starts_with(X10_MOUSE_PREFIX) {
        return None;
    }
    let start = X10_MOUSE_PREFIX.len();
    let payload = buf.get(start..start + 3)?;
    let cb = payload[0].checked_sub(32)?;
    let x = payload[1].checked_sub(32)?;
    let y = payload[2].checked_sub(32)?;
    Some(build_event(
        u16::from(cb),
        u16::from(x),
        u16::from(y),
        false,
        MouseProtocol::X10,
        &buf[..start + 3],
    ))
}

/// Parses a URXVT report at the start of `buf`.
///
/// URXVT sends the button code offset by 32, like X10.
pub fn parse_urxvt(buf: &[u8]) -> Option<MouseEvent> {
    if !buf.starts_with(CSI) || !buf.get(CSI.len())?.is_ascii_digit() {
        return None;
    }
    let ([cb, x, y], _, end) = parse_params(buf, CSI.len(), |b| b == b'M')?;
    let cb = if cb >= 32 { cb - 32 } else { cb };
    Some(build_event(cb, x, y, false, MouseProtocol::Urxvt, &buf[..end]))
}

/// Parses a mouse report of any supported protocol at the start of `buf`.
///
/// Bytes after the report are ignored; the event's `raw` field holds exactly
/// the bytes that were consumed. Returns `None` for empty, truncated or
/// unrecognized input.
///
/// # Examples
/// ```
/// use cortex_termio_input::{parse_mouse_sequence, MouseAction, MouseButton};
///
/// let event = parse_mouse_sequence(b"\x1b[<0;10;20M").unwrap();
/// assert_eq!(event.position(), (9, 19));
/// assert_eq!(event.button, MouseButton::Left);
/// assert_eq!(event.action, MouseAction::Press);
/// ```
pub fn parse_mouse_sequence(buf: &[u8]) -> Option<MouseEvent> {
    parse_sgr(buf)
        .or_else(|| parse_x10(buf))
        .or_else(|| parse_urxvt(buf))
}

/// Returns true if `buf` starts with a mouse report or a focus event.
pub fn is_mouse_buffer(buf: &[u8]) -> bool {
    parse_mouse_sequence(buf).is_some() || parse_focus_event(buf).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod button_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_basic_buttons() {
            assert_eq!(decode_button(0, false), (MouseButton::Left, MouseAction::Press));
            assert_eq!(decode_button(1, false), (MouseButton::Middle, MouseAction::Press));
            assert_eq!(decode_button(2, false), (MouseButton::Right, MouseAction::Press));
            assert_eq!(decode_button(3, false), (MouseButton::Unknown, MouseAction::Release));
        }

        #[test]
        fn test_wheel() {
            assert_eq!(decode_button(64, false), (MouseButton::WheelUp, MouseAction::Wheel));
            assert_eq!(decode_button(65, false), (MouseButton::WheelDown, MouseAction::Wheel));
            assert_eq!(decode_button(66, false), (MouseButton::Unknown, MouseAction::Wheel));
            assert_eq!(decode_button(64 + 16, false), (MouseButton::WheelUp, MouseAction::Wheel));
        }

        #[test]
        fn test_motion() {
            assert_eq!(decode_button(32, false), (MouseButton::Left, MouseAction::Move));
            assert_eq!(decode_button(34, false), (MouseButton::Right, MouseAction::Move));
            assert_eq!(decode_button(35, false), (MouseButton::Unknown, MouseAction::Move));
        }

        #[test]
        fn test_sgr_release_keeps_button() {
            assert_eq!(decode_button(2, true), (MouseButton::Right, MouseAction::Release));
        }

        #[test]
        fn test_extended_buttons_are_unknown() {
            assert_eq!(decode_button(128, false), (MouseButton::Unknown, MouseAction::Press));
        }
    }

    mod sgr_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_press() {
            let event = parse_sgr(b"\x1b[<0;10;20M").unwrap();
            assert_eq!(event.x, 9);
            assert_eq!(event.y, 19);
            assert_eq!(event.button, MouseButton::Left);
            assert_eq!(event.action, MouseAction::Press);
            assert_eq!(event.protocol, MouseProtocol::Sgr);
            assert_eq!(event.raw, b"\x1b[<0;10;20M");
        }

        #[test]
        fn test_release() {
            let event = parse_sgr(b"\x1b[<0;1;1m").unwrap();
            assert!(event.is_release());
            assert_eq!(event.button, MouseButton::Left);
            assert_eq!(event.position(), (0, 0));
        }

        #[test]
        fn test_modifiers() {
            let event = parse_sgr(b"\x1b[<28;5;5M").unwrap();
            assert!(event.ctrl());
            assert!(event.meta());
            assert!(event.shift());
            assert_eq!(event.button, MouseButton::Left);
        }

        #[test]
        fn test_large_coordinates() {
            let event = parse_sgr(b"\x1b[<0;300;1000M").unwrap();
            assert_eq!(event.position(), (299, 999));
        }

        #[test]
        fn test_trailing_bytes_not_consumed() {
            let event = parse_sgr(b"\x1b[<64;3;4Mabc").unwrap();
            assert!(event.is_wheel());
            assert_eq!(event.raw.len(), 10);
        }

        #[test]
        fn test_malformed() {
            assert_eq!(parse_sgr(b"\x1b[<0;10M"), None);
            assert_eq!(parse_sgr(b"\x1b[<0;10;20"), None);
            assert_eq!(parse_sgr(b"\x1b[<0;;20M"), None);
            assert_eq!(parse_sgr(b"\x1b[<0;10;20;5M"), None);
            assert_eq!(parse_sgr(b"\x1b[<a;10;20M"), None);
            assert_eq!(parse_sgr(b"\x1b[<0;99999999;1M"), None);
        }
    }

    mod x10_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_press() {
            let event = parse_x10(b"\x1b[M\x20\x2a\x34").unwrap();
            assert_eq!(event.position(), (9, 19));
            assert_eq!(event.button, MouseButton::Left);
            assert_eq!(event.action, MouseAction::Press);
            assert_eq!(event.protocol, MouseProtocol::X10);
        }

        #[test]
        fn test_release_is_unknown_button() {
            let event = parse_x10(b"\x1b[M\x23\x21\x21").unwrap();
            assert_eq!(event.button, MouseButton::Unknown);
            assert!(event.is_release());
        }

        #[test]
        fn test_too_short_or_invalid() {
            assert_eq!(parse_x10(b"\x1b[M\x20\x2a"), None);
            assert_eq!(parse_x10(b"\x1b[M"), None);
            assert_eq!(parse_x10(b"\x1b[M\x10\x2a\x34"), None);
        }

        #[test]
        fn test_zero_coordinate_saturates() {
            let event = parse_x10(b"\x1b[M\x20\x20\x20").unwrap();
            assert_eq!(event.position(), (0, 0));
        }
    }

    mod urxvt_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_press() {
            let event = parse_urxvt(b"\x1b[32;10;20M").unwrap();
            assert_eq!(event.position(), (9, 19));
            assert_eq!(event.button, MouseButton::Left);
            assert_eq!(event.action, MouseAction::Press);
            assert_eq!(event.protocol, MouseProtocol::Urxvt);
        }

        #[test]
        fn test_wheel_and_release() {
            assert!(parse_urxvt(b"\x1b[96;1;1M").unwrap().is_wheel());
            assert!(parse_urxvt(b"\x1b[35;1;1M").unwrap().is_release());
        }

        #[test]
        fn test_rejects_other_csi() {
            assert_eq!(parse_urxvt(b"\x1b[200~"), None);
            assert_eq!(parse_urxvt(b"\x1b[1;5A"), None);
            assert_eq!(parse_urxvt(b"\x1b[<0;1;1M"), None);
        }
    }

    mod dispatch_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_rejects_non_mouse() {
            assert_eq!(parse_mouse_sequence(b""), None);
            assert_eq!(parse_mouse_sequence(b"\x1b"), None);
            assert_eq!(parse_mouse_sequence(b"\x1b["), None);
            assert_eq!(parse_mouse_sequence(b"hello"), None);
        }

        #[test]
        fn test_is_mouse_buffer() {
            assert!(is_mouse_buffer(b"\x1b[<0;1;1M"));
            assert!(is_mouse_buffer(b"\x1b[I"));
            assert!(is_mouse_buffer(b"\x1b[O"));
            assert!(!is_mouse_buffer(b"\x1b[A"));
            assert!(!is_mouse_buffer(b""));
        }

        #[test]
        fn test_display() {
            let event = parse_mouse_sequence(b"\x1b[<0;10;20M").unwrap();
            assert_eq!(event.to_string(), "press(left)@(9,19)");
            assert_eq!(MouseProtocol::Urxvt.to_string(), "urxvt");
        }
    }
}
