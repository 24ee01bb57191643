//! RGB, HSL, hex and packed truecolor representations.
//!
//! Channels are stored as `u8`, so a constructed [`Rgb`] can never hold an
//! out-of-range value. Wider inputs go through [`Rgb::clamped`], which clamps
//! instead of wrapping.

use crate::error::{ColorError, Result};
use std::fmt;

/// Largest value representable as a packed 24-bit truecolor integer.
pub const TRUECOLOR_MAX: u32 = 0x00FF_FFFF;

// ============================================================================
// Rgb
// ============================================================================

/// An sRGB color with 8-bit channels and optional alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Optional alpha (0.0 = transparent, 1.0 = opaque).
    pub a: Option<f32>,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates an opaque color without alpha.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    /// Creates a color from arbitrary integers, clamping each channel to `0..=255`.
    #[must_use]
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Returns a copy carrying the given alpha, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: Some(clamp_unit(alpha)),
            ..self
        }
    }

    /// Returns the channels as a tuple, ignoring alpha.
    #[must_use]
    pub const fn channels(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Returns true if both colors have identical RGB channels (alpha ignored).
    #[must_use]
    pub fn same_channels(self, other: Self) -> bool {
        self.channels() == other.channels()
    }

    /// Squared Euclidean distance in RGB space.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Relative luminance approximation (ITU-R BT.601 weights), `0..=255`.
    #[must_use]
    pub fn luma(self) -> u8 {
        let y = 0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b);
        y.round().clamp(0.0, 255.0) as u8
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            Some(a) => write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, a),
            None => write!(f, "rgb({}, {}, {})", self.r, self.g, self.b),
        }
    }
}

/// Clamps an integer to a color channel.
#[must_use]
pub fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        1.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn unit_to_channel(value: f32) -> u8 {
    if value.is_finite() {
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    } else {
        0
    }
}

// ============================================================================
// Hsl
// ============================================================================

/// A color in hue/saturation/lightness form.
///
/// Hue is in degrees `[0, 360)`, saturation and lightness are percentages
/// `[0, 100]`. Components are kept unrounded so that an RGB round trip is exact
/// up to the final channel rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f32,
    /// Saturation percentage.
    pub s: f32,
    /// Lightness percentage.
    pub l: f32,
    /// Optional alpha (0.0 = transparent, 1.0 = opaque).
    pub a: Option<f32>,
}

impl Hsl {
    /// Creates an HSL color, normalizing hue and clamping the percentages.
    #[must_use]
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self {
            h: normalize_hue(h),
            s: clamp_percent(s),
            l: clamp_percent(l),
            a: None,
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            Some(a) => write!(f, "hsla({}, {}%, {}%, {})", self.h, self.s, self.l, a),
            None => write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l),
        }
    }
}

fn normalize_hue(h: f32) -> f32 {
    if !h.is_finite() {
        return 0.0;
    }
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

fn clamp_percent(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Converts RGB to HSL using the standard formulas. Alpha is carried over.
#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let max8 = rgb.r.max(rgb.g).max(rgb.b);
    let min8 = rgb.r.min(rgb.g).min(rgb.b);

    let r = f32::from(rgb.r) / 255.0;
    let g = f32::from(rgb.g) / 255.0;
    let b = f32::from(rgb.b) / 255.0;
    let max = f32::from(max8) / 255.0;
    let min = f32::from(min8) / 255.0;
    let l = (max + min) / 2.0;

    if max8 == min8 {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
            a: rgb.a,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max8 == rgb.r {
        (g - b) / d + if rgb.g < rgb.b { 6.0 } else { 0.0 }
    } else if max8 == rgb.g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: normalize_hue(h * 60.0),
        s: s * 100.0,
        l: l * 100.0,
        a: rgb.a,
    }
}

/// Converts HSL to RGB. Out-of-range components are normalized first.
#[must_use]
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = normalize_hue(hsl.h) / 360.0;
    let s = clamp_percent(hsl.s) / 100.0;
    let l = clamp_percent(hsl.l) / 100.0;

    let rgb = if s <= 0.0 {
        let v = unit_to_channel(l);
        Rgb::new(v, v, v)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Rgb::new(
            unit_to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
            unit_to_channel(hue_to_channel(p, q, h)),
            unit_to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
        )
    };

    match hsl.a {
        Some(a) => rgb.with_alpha(a),
        None => rgb,
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// ============================================================================
// Hex
// ============================================================================

/// Parses a hex color (`RGB`, `RRGGBB` or `RRGGBBAA`, optional `#` prefix).
///
/// The 8-digit form maps the alpha byte to `0.0..=1.0`.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(ColorError::Empty);
    }

    let len = digits.chars().count();
    if !matches!(len, 3 | 6 | 8) {
        return Err(ColorError::InvalidHexLength(len));
    }

    let nibbles = digits
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHexChar(c)))
        .collect::<Result<Vec<u8>>>()?;

    // #RGB -> #RRGGBB
    let bytes: Vec<u8> = if len == 3 {
        nibbles.iter().map(|n| (n << 4) | n).collect()
    } else {
        nibbles.chunks_exact(2).map(|pair| (pair[0] << 4) | pair[1]).collect()
    };

    let rgb = Rgb::new(bytes[0], bytes[1], bytes[2]);
    Ok(match bytes.get(3) {
        Some(&alpha) => rgb.with_alpha(f32::from(alpha) / 255.0),
        None => rgb,
    })
}

/// Formats a color as `#RRGGBB`, or `#RRGGBBAA` when alpha is present.
#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    match rgb.a {
        Some(a) => format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            rgb.r,
            rgb.g,
            rgb.b,
            unit_to_channel(clamp_unit(a))
        ),
        None => format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b),
    }
}

// ============================================================================
// Truecolor
// ============================================================================

/// Packs a color as `(r << 16) | (g << 8) | b`. Alpha is dropped.
#[must_use]
pub fn rgb_to_truecolor(rgb: Rgb) -> u32 {
    (u32::from(rgb.r) << 16) | (u32::from(rgb.g) << 8) | u32::from(rgb.b)
}

/// Unpacks a 24-bit integer. Values above [`TRUECOLOR_MAX`] clamp to white.
#[must_use]
pub fn truecolor_to_rgb(value: u32) -> Rgb {
    let value = value.min(TRUECOLOR_MAX);
    Rgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod hex_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_parse_six_digit() {
            assert_eq!(hex_to_rgb("#FF8000").unwrap(), Rgb::new(255, 128, 0));
            assert_eq!(hex_to_rgb("ff8000").unwrap(), Rgb::new(255, 128, 0));
        }

        #[test]
        fn test_parse_three_digit_expands() {
            assert_eq!(hex_to_rgb("#f80").unwrap(), Rgb::new(255, 136, 0));
        }

        #[test]
        fn test_parse_eight_digit_alpha() {
            let rgb = hex_to_rgb("#00000080").unwrap();
            assert_eq!(rgb.channels(), (0, 0, 0));
            let alpha = rgb.a.unwrap();
            assert!((alpha - 128.0 / 255.0).abs() < 1e-6);
        }

        #[test]
        fn test_invalid_length() {
            assert_eq!(hex_to_rgb("#ABCD"), Err(ColorError::InvalidHexLength(4)));
            assert_eq!(hex_to_rgb("#12345"), Err(ColorError::InvalidHexLength(5)));
        }

        #[test]
        fn test_invalid_char() {
            assert_eq!(hex_to_rgb("#GG0000"), Err(ColorError::InvalidHexChar('G')));
        }

        #[test]
        fn test_multibyte_input_does_not_panic() {
            assert!(hex_to_rgb("#ééé").is_err());
        }

        #[test]
        fn test_empty() {
            assert_eq!(hex_to_rgb(""), Err(ColorError::Empty));
            assert_eq!(hex_to_rgb("#"), Err(ColorError::Empty));
        }

        #[test]
        fn test_round_trip_normalizes() {
            assert_eq!(rgb_to_hex(hex_to_rgb("#abc").unwrap()), "#AABBCC");
            assert_eq!(rgb_to_hex(hex_to_rgb("12ab9f").unwrap()), "#12AB9F");
            assert_eq!(rgb_to_hex(hex_to_rgb("#12ab9f7e").unwrap()), "#12AB9F7E");
        }

        #[test]
        fn test_round_trip_all_alpha_bytes() {
            for alpha in 0..=255u8 {
                let hex = format!("#102030{:02X}", alpha);
                assert_eq!(rgb_to_hex(hex_to_rgb(&hex).unwrap()), hex);
            }
        }
    }

    mod hsl_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_primary_colors() {
            let red = rgb_to_hsl(Rgb::new(255, 0, 0));
            assert!(red.h.abs() < 0.01);
            assert!((red.s - 100.0).abs() < 0.01);
            assert!((red.l - 50.0).abs() < 0.01);

            let green = rgb_to_hsl(Rgb::new(0, 255, 0));
            assert!((green.h - 120.0).abs() < 0.01);

            let blue = rgb_to_hsl(Rgb::new(0, 0, 255));
            assert!((blue.h - 240.0).abs() < 0.01);
        }

        #[test]
        fn test_gray_has_no_saturation() {
            let gray = rgb_to_hsl(Rgb::new(128, 128, 128));
            assert!(gray.s.abs() < f32::EPSILON);
            assert!(gray.h.abs() < f32::EPSILON);
        }

        #[test]
        fn test_hsl_to_rgb_known_values() {
            assert_eq!(hsl_to_rgb(Hsl::new(0.0, 100.0, 50.0)), Rgb::new(255, 0, 0));
            assert_eq!(hsl_to_rgb(Hsl::new(60.0, 100.0, 50.0)), Rgb::new(255, 255, 0));
            assert_eq!(hsl_to_rgb(Hsl::new(0.0, 0.0, 100.0)), Rgb::WHITE);
        }

        #[test]
        fn test_hue_wraps() {
            assert_eq!(
                hsl_to_rgb(Hsl::new(360.0, 100.0, 50.0)),
                hsl_to_rgb(Hsl::new(0.0, 100.0, 50.0))
            );
            assert_eq!(
                hsl_to_rgb(Hsl::new(-120.0, 100.0, 50.0)),
                hsl_to_rgb(Hsl::new(240.0, 100.0, 50.0))
            );
        }

        #[test]
        fn test_round_trip_within_one_unit() {
            for r in (0..=255u8).step_by(15) {
                for g in (0..=255u8).step_by(17) {
                    for b in (0..=255u8).step_by(51) {
                        let rgb = Rgb::new(r, g, b);
                        let back = hsl_to_rgb(rgb_to_hsl(rgb));
                        assert!(i16::from(back.r).abs_diff(i16::from(r)) <= 1, "{rgb} -> {back}");
                        assert!(i16::from(back.g).abs_diff(i16::from(g)) <= 1, "{rgb} -> {back}");
                        assert!(i16::from(back.b).abs_diff(i16::from(b)) <= 1, "{rgb} -> {back}");
                    }
                }
            }
        }

        #[test]
        fn test_alpha_carried() {
            let hsl = rgb_to_hsl(Rgb::new(10, 20, 30).with_alpha(0.5));
            assert_eq!(hsl.a, Some(0.5));
            assert_eq!(hsl_to_rgb(hsl).a, Some(0.5));
        }
    }

    mod truecolor_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_pack_unpack() {
            assert_eq!(rgb_to_truecolor(Rgb::new(0x12, 0x34, 0x56)), 0x0012_3456);
            assert_eq!(truecolor_to_rgb(0x0012_3456), Rgb::new(0x12, 0x34, 0x56));
        }

        #[test]
        fn test_out_of_range_clamps() {
            assert_eq!(truecolor_to_rgb(0xFF00_0000), Rgb::WHITE);
        }

        #[test]
        fn test_clamped_constructor() {
            assert_eq!(Rgb::clamped(300, -5, 128), Rgb::new(255, 0, 128));
            assert_eq!(rgb_to_truecolor(Rgb::clamped(999, 999, 999)), TRUECOLOR_MAX);
        }
    }
}
