//! Alternate character set (ACS) mapping.
//!
//! Terminals draw lines and boxes by switching into the DEC special graphics
//! set and emitting single-letter codes (`q` for a horizontal line, `l` for an
//! upper-left corner, ...). This module maps those codes to their symbolic
//! names and Unicode equivalents, and degrades Unicode box drawing back to
//! plain ASCII for terminals that cannot render it.

#![allow(clippy::non_std_lazy_statics)]

use crate::capabilities::{names, TerminalCapabilities};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Broad category of an ACS glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcsKind {
    /// Lines, corners, tees and scan lines.
    Line,
    /// Shaded or solid blocks.
    Block,
    /// Arrows, math symbols and other non-drawing glyphs.
    Symbol,
}

/// One entry of the ACS table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcsEntry {
    /// Symbolic curses name, e.g. `ulcorner`.
    pub name: &'static str,
    /// VT100 graphics code used in `acs_chars`.
    pub code: char,
    /// Unicode rendering.
    pub unicode: char,
    /// Plain ASCII fallback.
    pub ascii: char,
    /// Glyph category.
    pub kind: AcsKind,
}

const fn entry(name: &'static str, code: char, unicode: char, ascii: char, kind: AcsKind) -> AcsEntry {
    AcsEntry {
        name,
        code,
        unicode,
        ascii,
        kind,
    }
}

/// The full ACS table, in `acs_chars` code order.
pub const ACS_TABLE: &[AcsEntry] = &[
    entry("rarrow", '+', '→', '>', AcsKind::Symbol),
    entry("larrow", ',', '←', '<', AcsKind::Symbol),
    entry("uarrow", '-', '↑', '^', AcsKind::Symbol),
    entry("darrow", '.', '↓', 'v', AcsKind::Symbol),
    entry("block", '0', '█', '#', AcsKind::Block),
    entry("diamond", '`', '◆', '+', AcsKind::Symbol),
    entry("ckboard", 'a', '▒', ':', AcsKind::Block),
    entry("degree", 'f', '°', '\'', AcsKind::Symbol),
    entry("plminus", 'g', '±', '#', AcsKind::Symbol),
    entry("board", 'h', '░', '#', AcsKind::Block),
    entry("lantern", 'i', '␋', '#', AcsKind::Symbol),
    entry("lrcorner", 'j', '┘', '+', AcsKind::Line),
    entry("urcorner", 'k', '┐', '+', AcsKind::Line),
    entry("ulcorner", 'l', '┌', '+', AcsKind::Line),
    entry("llcorner", 'm', '└', '+', AcsKind::Line),
    entry("plus", 'n', '┼', '+', AcsKind::Line),
    entry("s1", 'o', '⎺', '~', AcsKind::Line),
    entry("s3", 'p', '⎻', '-', AcsKind::Line),
    entry("hline", 'q', '─', '-', AcsKind::Line),
    entry("s7", 'r', '⎼', '-', AcsKind::Line),
    entry("s9", 's', '⎽', '_', AcsKind::Line),
    entry("ltee", 't', '├', '+', AcsKind::Line),
    entry("rtee", 'u', '┤', '+', AcsKind::Line),
    entry("btee", 'v', '┴', '+', AcsKind::Line),
    entry("ttee", 'w', '┬', '+', AcsKind::Line),
    entry("vline", 'x', '│', '|', AcsKind::Line),
    entry("lequal", 'y', '≤', '<', AcsKind::Symbol),
    entry("gequal", 'z', '≥', '>', AcsKind::Symbol),
    entry("pi", '{', 'π', '*', AcsKind::Symbol),
    entry("nequal", '|', '≠', '!', AcsKind::Symbol),
    entry("sterling", '}', '£', 'f', AcsKind::Symbol),
    entry("bullet", '~', '·', 'o', AcsKind::Symbol),
];

static BY_NAME: Lazy<AHashMap<&'static str, &'static AcsEntry>> =
    Lazy::new(|| ACS_TABLE.iter().map(|e| (e.name, e)).collect());

static BY_CODE: Lazy<AHashMap<char, &'static AcsEntry>> =
    Lazy::new(|| ACS_TABLE.iter().map(|e| (e.code, e)).collect());

static BY_UNICODE: Lazy<AHashMap<char, &'static AcsEntry>> =
    Lazy::new(|| ACS_TABLE.iter().map(|e| (e.unicode, e)).collect());

/// Unicode character for a symbolic ACS name.
pub fn acs_to_unicode(name: &str) -> Option<char> {
    BY_NAME.get(name).map(|e| e.unicode)
}

/// VT100 graphics code for a symbolic ACS name.
pub fn acs_code(name: &str) -> Option<char> {
    BY_NAME.get(name).map(|e| e.code)
}

/// Unicode character for a VT100 graphics code.
pub fn acs_code_to_unicode(code: char) -> Option<char> {
    BY_CODE.get(&code).map(|e| e.unicode)
}

/// Symbolic ACS name for a Unicode character.
pub fn acs_name_for(ch: char) -> Option<&'static str> {
    BY_UNICODE.get(&ch).map(|e| e.name)
}

/// Decodes a terminfo `acs_chars` string into a code -> glyph map.
///
/// The string is a sequence of (code, glyph) pairs. A trailing unpaired
/// character is ignored.
pub fn parse_acsc(acsc: &str) -> BTreeMap<char, char> {
    let chars: Vec<char> = acsc.chars().collect();
    chars
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Maps every ACS code the terminal advertises to its Unicode rendering.
pub fn acs_unicode_map(caps: &TerminalCapabilities) -> BTreeMap<char, char> {
    let Some(acsc) = caps.get_string(names::ACS_CHARS) else {
        return BTreeMap::new();
    };
    parse_acsc(acsc)
        .into_keys()
        .filter_map(|code| acs_code_to_unicode(code).map(|unicode| (code, unicode)))
        .collect()
}

// ============================================================================
// ASCII degradation
// ============================================================================

const BOX_DRAWING: std::ops::RangeInclusive<char> = '\u{2500}'..='\u{257F}';
const BLOCK_ELEMENTS: std::ops::RangeInclusive<char> = '\u{2580}'..='\u{259F}';

/// ASCII replacement for a Unicode line, block or ACS symbol character.
pub fn unicode_to_ascii(ch: char) -> Option<char> {
    if let Some(entry) = BY_UNICODE.get(&ch) {
        return Some(entry.ascii);
    }
    if BOX_DRAWING.contains(&ch) {
        return Some(match ch {
            '─' | '━' | '┄' | '┅' | '┈' | '┉' | '╌' | '╍' | '═' | '╴' | '╶' | '╸' | '╺' | '╼'
            | '╾' => '-',
            '│' | '┃' | '┆' | '┇' | '┊' | '┋' | '╎' | '╏' | '║' | '╵' | '╷' | '╹' | '╻' | '╽'
            | '╿' => '|',
            '╱' => '/',
            '╲' => '\\',
            '╳' => 'X',
            _ => '+',
        });
    }
    if BLOCK_ELEMENTS.contains(&ch) {
        return Some('#');
    }
    None
}

/// Returns true for box-drawing, block-element and ACS line/block glyphs.
pub fn is_box_drawing_char(ch: char) -> bool {
    BOX_DRAWING.contains(&ch)
        || BLOCK_ELEMENTS.contains(&ch)
        || BY_UNICODE
            .get(&ch)
            .is_some_and(|e| e.kind != AcsKind::Symbol)
}

/// Returns true if any character of `s` is a box-drawing glyph.
pub fn contains_box_drawing(s: &str) -> bool {
    s.chars().any(is_box_drawing_char)
}

/// Replaces every line, block and ACS symbol character with its ASCII fallback.
///
/// Returns the input unchanged (borrowed) when nothing needs replacing.
pub fn string_to_ascii(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| unicode_to_ascii(c).is_some()) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .map(|c| unicode_to_ascii(c).unwrap_or(c))
            .collect(),
    )
}
