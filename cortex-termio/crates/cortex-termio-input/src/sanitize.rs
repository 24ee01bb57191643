//! Paste content sanitization and truncation.
//!
//! Bracketed paste content is data, never terminal commands. Every escape
//! sequence embedded in it is removed while all other characters, including
//! NUL and the remaining C0 controls, are kept verbatim.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

const ESC: char = '\x1b';
/// 8-bit CSI.
const C1_CSI: char = '\u{9b}';
/// 8-bit string terminator.
const C1_ST: char = '\u{9c}';

/// Removes every ANSI/VT escape sequence from pasted text.
///
/// Handled forms:
///
/// - CSI (`ESC [` or 8-bit `0x9B`): parameters, intermediates, one final byte
/// - OSC, DCS, SOS, PM and APC strings, terminated by BEL or ST
/// - nF sequences such as `ESC ( B`
/// - single-character escapes such as `ESC c` or `ESC 7`
///
/// A malformed CSI ends at the first byte that cannot belong to it; that byte
/// is kept as content. An unterminated string sequence swallows the rest of
/// the input. The scan is a single forward pass.
///
/// # Examples
/// ```
/// use cortex_termio_input::sanitize_pasted_text;
///
/// assert_eq!(sanitize_pasted_text("\x1b[31mred\x1b[0m"), "red");
/// assert_eq!(sanitize_pasted_text("a\0b"), "a\0b");
/// ```
pub fn sanitize_pasted_text(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_introducer) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESC => skip_escape(&mut chars),
            C1_CSI => skip_csi(&mut chars),
            '\u{90}' | '\u{98}' | '\u{9d}' | '\u{9e}' | '\u{9f}' => skip_string(&mut chars),
            _ => result.push(c),
        }
    }

    Cow::Owned(result)
}

fn is_introducer(c: char) -> bool {
    matches!(
        c,
        ESC | C1_CSI | '\u{90}' | '\u{98}' | '\u{9d}' | '\u{9e}' | '\u{9f}'
    )
}

/// Consumes what follows an ESC that has already been taken.
fn skip_escape(chars: &mut Peekable<Chars<'_>>) {
    match chars.peek().copied() {
        Some('[') => {
            chars.next();
            skip_csi(chars);
        }
        // OSC, DCS, SOS, PM, APC
        Some(']' | 'P' | 'X' | '^' | '_') => {
            chars.next();
            skip_string(chars);
        }
        Some('\x20'..='\x2f') => {
            while chars.next_if(|c| ('\x20'..='\x2f').contains(c)).is_some() {}
            chars.next_if(|c| ('\x30'..='\x7e').contains(c));
        }
        Some('\x30'..='\x7e') => {
            chars.next();
        }
        // lone ESC, or ESC before a control/non-ASCII character
        _ => {}
    }
}

/// Consumes CSI parameter, intermediate and final bytes.
fn skip_csi(chars: &mut Peekable<Chars<'_>>) {
    while let Some(&c) = chars.peek() {
        match c {
            '\x20'..='\x3f' => {
                chars.next();
            }
            '\x40'..='\x7e' => {
                chars.next();
                return;
            }
            _ => return,
        }
    }
}

/// Consumes a control string up to and including BEL or ST.
///
/// An ESC not followed by `\` ends the string and is parsed as the start of
/// the next sequence.
fn skip_string(chars: &mut Peekable<Chars<'_>>) {
    while let Some(&c) = chars.peek() {
        match c {
            '\x07' | C1_ST => {
                chars.next();
                return;
            }
            ESC => {
                chars.next();
                if chars.next_if_eq(&'\\').is_none() {
                    skip_escape(chars);
                }
                return;
            }
            _ => {
                chars.next();
            }
        }
    }
}

/// Truncates text to at most `limit` characters; `0` means unlimited.
///
/// Truncation happens on a character boundary, so multi-byte characters are
/// never split. The result always borrows from the input.
///
/// # Examples
/// ```
/// use cortex_termio_input::truncate_paste;
///
/// assert_eq!(truncate_paste("héllo", 2), "hé");
/// assert_eq!(truncate_paste("héllo", 0), "héllo");
/// ```
pub fn truncate_paste(text: &str, limit: usize) -> Cow<'_, str> {
    if limit == 0 {
        return Cow::Borrowed(text);
    }
    match text.char_indices().nth(limit) {
        Some((cut, _)) => Cow::Borrowed(&text[..cut]),
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sanitize_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_plain_text_borrowed() {
            let text = "hello\tworld\r\n";
            assert!(matches!(sanitize_pasted_text(text), Cow::Borrowed(_)));
        }

        #[test]
        fn test_strips_csi() {
            assert_eq!(sanitize_pasted_text("a\x1b[1;31mb\x1b[0mc"), "abc");
            assert_eq!(sanitize_pasted_text("\x1b[?1049h\x1b[2J"), "");
            assert_eq!(sanitize_pasted_text("x\u{9b}31my"), "xy");
        }

        #[test]
        fn test_strips_nested_paste_markers() {
            assert_eq!(sanitize_pasted_text("a\x1b[201~b\x1b[200~c"), "abc");
        }

        #[test]
        fn test_strips_osc_with_bel_and_st() {
            assert_eq!(sanitize_pasted_text("a\x1b]0;title\x07b"), "ab");
            assert_eq!(sanitize_pasted_text("a\x1b]8;;http://x\x1b\\link\x1b]8;;\x1b\\b"), "alinkb");
            assert_eq!(sanitize_pasted_text("a\x1b]52;c;AAAA\u{9c}b"), "ab");
        }

        #[test]
        fn test_strips_dcs_and_apc() {
            assert_eq!(sanitize_pasted_text("a\x1bPq#0;2;0;0;0\x1b\\b"), "ab");
            assert_eq!(sanitize_pasted_text("a\x1b_Ga=T;AAAA\x1b\\b"), "ab");
        }

        #[test]
        fn test_string_interrupted_by_escape() {
            assert_eq!(sanitize_pasted_text("a\x1b]0;t\x1b[31mb"), "ab");
        }

        #[test]
        fn test_strips_single_char_and_nf() {
            assert_eq!(sanitize_pasted_text("a\x1bcb"), "ab");
            assert_eq!(sanitize_pasted_text("a\x1b7b\x1b8"), "ab");
            assert_eq!(sanitize_pasted_text("a\x1b(Bb"), "ab");
            assert_eq!(sanitize_pasted_text("a\x1b#8b"), "ab");
        }

        #[test]
        fn test_lone_and_trailing_escape() {
            assert_eq!(sanitize_pasted_text("abc\x1b"), "abc");
            assert_eq!(sanitize_pasted_text("\x1b"), "");
            assert_eq!(sanitize_pasted_text("a\x1b\nb"), "a\nb");
            assert_eq!(sanitize_pasted_text("a\x1b[12"), "a");
        }

        #[test]
        fn test_malformed_csi_keeps_terminating_byte() {
            assert_eq!(sanitize_pasted_text("a\x1b[12\nb"), "a\nb");
            assert_eq!(sanitize_pasted_text("a\x1b[é"), "aé");
        }

        #[test]
        fn test_preserves_controls_and_nul() {
            let text = "a\0b\x07c\x08d";
            assert_eq!(sanitize_pasted_text(text), text);
            assert_eq!(sanitize_pasted_text("\0\x1b[m\0"), "\0\0");
        }

        #[test]
        fn test_unterminated_osc_swallows_rest() {
            assert_eq!(sanitize_pasted_text("keep\x1b]0;never ends"), "keep");
        }

        #[test]
        fn test_pathological_repetition() {
            let input = "\x1b[31mX\x1b]0;t\x07".repeat(10_000);
            let output = sanitize_pasted_text(&input);
            assert_eq!(output.len(), 10_000);
            assert!(output.chars().all(|c| c == 'X'));
        }

        #[test]
        fn test_never_longer_and_never_contains_escape() {
            let samples = [
                "",
                "\x1b",
                "\x1b\x1b\x1b",
                "\x1b[",
                "\x1b]",
                "\x1b]\x1b",
                "\x1bP\x1b\\\x1b",
                "a\x1b[1;2;3;4;5;6;7;8;9;10;11;12;13;14;15;16;17;18;19;20m",
                "日本\x1b[31m語",
                "\u{9b}\u{9d}\u{9c}",
            ];
            for sample in samples {
                let output = sanitize_pasted_text(sample);
                assert!(output.len() <= sample.len(), "{sample:?}");
                assert!(!output.contains('\x1b'), "{sample:?}");
            }
        }
    }

    mod truncate_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_unlimited() {
            assert_eq!(truncate_paste("abc", 0), "abc");
        }

        #[test]
        fn test_counts_characters_not_bytes() {
            assert_eq!(truncate_paste("日本語テキスト", 3), "日本語");
            assert_eq!(truncate_paste("a😀b", 2), "a😀");
        }

        #[test]
        fn test_shorter_than_limit() {
            assert_eq!(truncate_paste("ab", 5), "ab");
            assert_eq!(truncate_paste("abc", 3), "abc");
        }

        #[test]
        fn test_result_within_limit() {
            let text = "ß∂ƒ©˙∆˚¬…æ";
            for limit in 1..15 {
                let out = truncate_paste(text, limit);
                assert!(out.chars().count() <= limit);
                assert!(text.starts_with(out.as_ref()));
            }
        }
    }
}
