//! A unified color value and the conversions between its representations.

use crate::error::{ColorError, Result};
use crate::palette::{color256_to_rgb, rgb_to_color256};
use crate::rgb::{
    hex_to_rgb, hsl_to_rgb, rgb_to_hex, rgb_to_hsl, rgb_to_truecolor, Hsl, Rgb, TRUECOLOR_MAX,
};
use std::fmt;
use std::str::FromStr;

/// Any of the color representations understood by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    /// 8-bit channels with optional alpha.
    Rgb(Rgb),
    /// Hue/saturation/lightness.
    Hsl(Hsl),
    /// xterm 256-color palette index.
    Color256(u8),
    /// Packed `0xRRGGBB` integer.
    Truecolor(u32),
    /// Hex string, `#RRGGBB` with optional alpha byte. Validated on conversion.
    Hex(String),
}

impl From<Rgb> for ColorValue {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Hsl> for ColorValue {
    fn from(hsl: Hsl) -> Self {
        Self::Hsl(hsl)
    }
}

impl FromStr for ColorValue {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Rgb(rgb) => write!(f, "{}", rgb),
            ColorValue::Hsl(hsl) => write!(f, "{}", hsl),
            ColorValue::Color256(index) => write!(f, "color256({})", index),
            ColorValue::Truecolor(value) => write!(f, "0x{:06X}", value),
            ColorValue::Hex(hex) => f.write_str(hex),
        }
    }
}

// ============================================================================
// Dispatchers
// ============================================================================

/// Resolves any representation to RGB.
pub fn to_rgb(value: &ColorValue) -> Result<Rgb> {
    match value {
        ColorValue::Rgb(rgb) => Ok(*rgb),
        ColorValue::Hsl(hsl) => Ok(hsl_to_rgb(*hsl)),
        ColorValue::Color256(index) => Ok(color256_to_rgb(*index)),
        ColorValue::Truecolor(packed) => {
            if *packed > TRUECOLOR_MAX {
                return Err(ColorError::TruecolorOutOfRange(*packed));
            }
            Ok(crate::rgb::truecolor_to_rgb(*packed))
        }
        ColorValue::Hex(hex) => hex_to_rgb(hex),
    }
}

/// Resolves any representation to HSL.
pub fn to_hsl(value: &ColorValue) -> Result<Hsl> {
    match value {
        ColorValue::Hsl(hsl) => Ok(*hsl),
        other => to_rgb(other).map(rgb_to_hsl),
    }
}

/// Resolves any representation to a 256-color palette index.
///
/// Palette indices pass through untouched; everything else is quantized.
pub fn to_color256(value: &ColorValue) -> Result<u8> {
    match value {
        ColorValue::Color256(index) => Ok(*index),
        other => to_rgb(other).map(rgb_to_color256),
    }
}

/// Resolves any representation to a packed 24-bit integer.
pub fn to_truecolor(value: &ColorValue) -> Result<u32> {
    to_rgb(value).map(rgb_to_truecolor)
}

/// Resolves any representation to a normalized uppercase hex string.
pub fn to_hex(value: &ColorValue) -> Result<String> {
    to_rgb(value).map(rgb_to_hex)
}

// ============================================================================
// Textual parsing
// ============================================================================

/// Parses a textual color.
///
/// Accepted notations:
///
/// - `#RGB`, `#RRGGBB`, `#RRGGBBAA` and the same without `#`
/// - `0xRRGGBB`
/// - `rgb(r, g, b)` and `rgba(r, g, b, a)`, channels clamped to `0..=255`
/// - `hsl(h, s%, l%)` and `hsla(h, s%, l%, a)`
/// - `color256(n)` or `ansi(n)`
pub fn parse_color(input: &str) -> Result<ColorValue> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if s.starts_with('#') {
        hex_to_rgb(s)?;
        return Ok(ColorValue::Hex(s.to_string()));
    }

    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        let packed = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorError::InvalidFormat(s.to_string()))?;
        if packed > TRUECOLOR_MAX {
            return Err(ColorError::TruecolorOutOfRange(packed));
        }
        return Ok(ColorValue::Truecolor(packed));
    }

    if let Some((name, args)) = split_function(s) {
        return parse_function(&name, &args, s);
    }

    if matches!(s.len(), 3 | 6 | 8) && s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(ColorValue::Hex(format!("#{}", s)));
    }

    Err(ColorError::InvalidFormat(s.to_string()))
}

fn split_function(s: &str) -> Option<(String, Vec<&str>)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    let name = s[..open].trim().to_ascii_lowercase();
    let args = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(str::trim).collect()
    };
    Some((name, args))
}

fn parse_function(name: &str, args: &[&str], input: &str) -> Result<ColorValue> {
    let invalid = || ColorError::InvalidFormat(input.to_string());

    match (name, args.len()) {
        ("rgb", 3) | ("rgba", 4) => {
            let r = number(args[0], input)?;
            let g = number(args[1], input)?;
            let b = number(args[2], input)?;
            let rgb = Rgb::clamped(r.round() as i64, g.round() as i64, b.round() as i64);
            Ok(ColorValue::Rgb(match args.get(3) {
                Some(a) => rgb.with_alpha(number(a, input)? as f32),
                None => rgb,
            }))
        }
        ("hsl", 3) | ("hsla", 4) => {
            let mut hsl = Hsl::new(
                number(args[0], input)? as f32,
                number(args[1], input)? as f32,
                number(args[2], input)? as f32,
            );
            if let Some(a) = args.get(3) {
                hsl.a = Some((number(a, input)? as f32).clamp(0.0, 1.0));
            }
            Ok(ColorValue::Hsl(hsl))
        }
        ("color256" | "ansi", 1) => {
            let index: i64 = args[0].parse().map_err(|_| invalid())?;
            u8::try_from(index)
                .map(ColorValue::Color256)
                .map_err(|_| ColorError::Color256OutOfRange(index))
        }
        _ => Err(invalid()),
    }
}

fn number(arg: &str, input: &str) -> Result<f64> {
    let arg = arg.trim();
    let arg = arg
        .strip_suffix('%')
        .or_else(|| arg.strip_suffix("deg"))
        .unwrap_or(arg);
    match arg.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ColorError::InvalidFormat(input.to_string())),
    }
}
