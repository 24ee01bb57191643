//! SGR (Select Graphic Rendition) parameter helpers.
//!
//! The `fg_*`/`bg_*` helpers return parameter strings such as `38;5;196`,
//! not full escape sequences, so callers can combine several attributes into
//! one sequence with [`sgr`].

use crate::rgb::Rgb;

/// Resets all attributes.
pub const SGR_RESET: &str = "\x1b[0m";

/// Foreground parameters for a 256-color palette index.
#[must_use]
pub fn fg_256(index: u8) -> String {
    format!("38;5;{}", index)
}

/// Background parameters for a 256-color palette index.
#[must_use]
pub fn bg_256(index: u8) -> String {
    format!("48;5;{}", index)
}

/// Foreground parameters for a 24-bit color.
#[must_use]
pub fn fg_truecolor(rgb: Rgb) -> String {
    format!("38;2;{};{};{}", rgb.r, rgb.g, rgb.b)
}

/// Background parameters for a 24-bit color.
#[must_use]
pub fn bg_truecolor(rgb: Rgb) -> String {
    format!("48;2;{};{};{}", rgb.r, rgb.g, rgb.b)
}

/// Wraps parameter strings into a complete `ESC [ ... m` sequence.
///
/// An empty parameter list yields `ESC [ m`, which terminals treat as a reset.
#[must_use]
pub fn sgr<S: AsRef<str>>(params: &[S]) -> String {
    let mut out = String::from("\x1b[");
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push_str(param.as_ref());
    }
    out.push('m');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_params() {
        assert_eq!(fg_256(196), "38;5;196");
        assert_eq!(bg_256(0), "48;5;0");
    }

    #[test]
    fn test_truecolor_params() {
        assert_eq!(fg_truecolor(Rgb::new(1, 2, 3)), "38;2;1;2;3");
        assert_eq!(bg_truecolor(Rgb::new(255, 128, 0)), "48;2;255;128;0");
    }

    #[test]
    fn test_sgr_joins() {
        assert_eq!(sgr(&[fg_256(9), bg_256(0)]), "\x1b[38;5;9;48;5;0m");
        assert_eq!(sgr(&["1"]), "\x1b[1m");
        assert_eq!(sgr::<&str>(&[]), "\x1b[m");
    }
}
