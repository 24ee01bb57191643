//! Escape sequences recognized on input, and the mode switches that enable them.

/// Escape byte.
pub const ESC: u8 = 0x1b;

/// Control Sequence Introducer (`ESC [`).
pub const CSI: &[u8] = b"\x1b[";

/// Bracketed paste start marker.
pub const PASTE_START: &[u8] = b"\x1b[200~";

/// Bracketed paste end marker.
pub const PASTE_END: &[u8] = b"\x1b[201~";

/// Focus gained.
pub const FOCUS_IN: &[u8] = b"\x1b[I";

/// Focus lost.
pub const FOCUS_OUT: &[u8] = b"\x1b[O";

/// Prefix of an SGR (1006) mouse report.
pub const SGR_MOUSE_PREFIX: &[u8] = b"\x1b[<";

/// Prefix of an X10 (1000) mouse report.
pub const X10_MOUSE_PREFIX: &[u8] = b"\x1b[M";

/// Enables bracketed paste mode.
pub const ENABLE_BRACKETED_PASTE: &str = "\x1b[?2004h";

/// Disables bracketed paste mode.
pub const DISABLE_BRACKETED_PASTE: &str = "\x1b[?2004l";

/// Enables focus reporting.
pub const ENABLE_FOCUS_REPORTING: &str = "\x1b[?1004h";

/// Disables focus reporting.
pub const DISABLE_FOCUS_REPORTING: &str = "\x1b[?1004l";

/// Enables button, drag and motion tracking with SGR coordinates.
pub const ENABLE_MOUSE_SGR: &str = "\x1b[?1000h\x1b[?1002h\x1b[?1003h\x1b[?1006h";

/// Disables every mouse mode enabled by [`ENABLE_MOUSE_SGR`].
pub const DISABLE_MOUSE_SGR: &str = "\x1b[?1006l\x1b[?1003l\x1b[?1002l\x1b[?1000l";
