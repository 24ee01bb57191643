//! Terminal capability records.
//!
//! A [`TerminalCapabilities`] value is a uniform, immutable description of one
//! terminal type: boolean flags, numeric limits and escape-string templates,
//! keyed by their long terminfo names (`cursor_address`, `max_colors`, ...).

use crate::acs;
use crate::error::{Result, TparmError};
use crate::tparm::{tparm, Param};
use std::collections::BTreeMap;

// ============================================================================
// Capability names
// ============================================================================

/// Long names of the string capabilities the resolver relies on.
pub mod names {
    /// Move the cursor to row `%p1`, column `%p2`.
    pub const CURSOR_ADDRESS: &str = "cursor_address";
    /// Home the cursor.
    pub const CURSOR_HOME: &str = "cursor_home";
    /// Clear the screen and home the cursor.
    pub const CLEAR_SCREEN: &str = "clear_screen";
    /// Enter the alternate screen.
    pub const ENTER_CA_MODE: &str = "enter_ca_mode";
    /// Leave the alternate screen.
    pub const EXIT_CA_MODE: &str = "exit_ca_mode";
    /// Set ANSI foreground color `%p1`.
    pub const SET_A_FOREGROUND: &str = "set_a_foreground";
    /// Set ANSI background color `%p1`.
    pub const SET_A_BACKGROUND: &str = "set_a_background";
    /// Restore the default color pair.
    pub const ORIG_PAIR: &str = "orig_pair";
    /// Bold on.
    pub const ENTER_BOLD_MODE: &str = "enter_bold_mode";
    /// Underline on.
    pub const ENTER_UNDERLINE_MODE: &str = "enter_underline_mode";
    /// Reverse video on.
    pub const ENTER_REVERSE_MODE: &str = "enter_reverse_mode";
    /// Turn off all attributes.
    pub const EXIT_ATTRIBUTE_MODE: &str = "exit_attribute_mode";
    /// Graphics charset pairs.
    pub const ACS_CHARS: &str = "acs_chars";
    /// Start the alternate character set.
    pub const ENTER_ALT_CHARSET_MODE: &str = "enter_alt_charset_mode";
    /// End the alternate character set.
    pub const EXIT_ALT_CHARSET_MODE: &str = "exit_alt_charset_mode";
    /// Maximum number of colors.
    pub const MAX_COLORS: &str = "max_colors";
    /// Number of lines on the screen.
    pub const LINES: &str = "lines";
    /// Number of columns in a line.
    pub const COLUMNS: &str = "columns";
}

// ============================================================================
// TerminalCapabilities
// ============================================================================

/// Capability profile for one terminal type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerminalCapabilities {
    /// Canonical terminal name.
    pub name: String,
    /// Alternate names resolving to this profile.
    pub names: Vec<String>,
    /// Boolean capabilities that are set.
    pub booleans: BTreeMap<String, bool>,
    /// Numeric capabilities.
    pub numbers: BTreeMap<String, i32>,
    /// String capabilities (escape templates).
    pub strings: BTreeMap<String, String>,
}

impl TerminalCapabilities {
    /// Starts building a new profile.
    pub fn builder(name: impl Into<String>) -> CapabilitiesBuilder {
        CapabilitiesBuilder {
            caps: TerminalCapabilities {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    /// Starts a new profile that inherits every capability of `self`.
    ///
    /// Aliases are not inherited.
    pub fn extend(&self, name: impl Into<String>) -> CapabilitiesBuilder {
        CapabilitiesBuilder {
            caps: TerminalCapabilities {
                name: name.into(),
                names: Vec::new(),
                booleans: self.booleans.clone(),
                numbers: self.numbers.clone(),
                strings: self.strings.clone(),
            },
        }
    }

    /// Returns true if `name` is the canonical name or one of the aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.names.iter().any(|alias| alias == name)
    }

    /// Returns a boolean capability, `false` when absent.
    pub fn get_flag(&self, name: &str) -> bool {
        self.booleans.get(name).copied().unwrap_or(false)
    }

    /// Returns a numeric capability.
    pub fn get_number(&self, name: &str) -> Option<i32> {
        self.numbers.get(name).copied()
    }

    /// Returns a string capability template.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    /// Number of colors the terminal supports, 0 for monochrome.
    pub fn max_colors(&self) -> u32 {
        self.get_number(names::MAX_COLORS)
            .map_or(0, |n| u32::try_from(n).unwrap_or(0))
    }

    /// Returns true if the terminal supports at least the 8 ANSI colors.
    pub fn has_colors(&self) -> bool {
        self.max_colors() >= 8
    }

    /// Expands a parameterized string capability.
    pub fn expand(&self, name: &str, params: &[Param]) -> Result<String> {
        let template = self
            .get_string(name)
            .ok_or_else(|| TparmError::MissingCapability(name.to_string()))?;
        tparm(template, params)
    }

    /// Cursor movement to a 0-indexed cell.
    pub fn cursor_address(&self, row: u16, col: u16) -> Result<String> {
        self.expand(names::CURSOR_ADDRESS, &[Param::from(row), Param::from(col)])
    }

    /// Foreground color selection for a palette index.
    pub fn set_foreground(&self, color: u8) -> Result<String> {
        self.expand(names::SET_A_FOREGROUND, &[Param::from(color)])
    }

    /// Background color selection for a palette index.
    pub fn set_background(&self, color: u8) -> Result<String> {
        self.expand(names::SET_A_BACKGROUND, &[Param::from(color)])
    }

    /// Returns the character this terminal draws, in its alternate character
    /// set, for the symbolic ACS name (`hline`, `ulcorner`, ...).
    pub fn acs_glyph(&self, acs_name: &str) -> Option<char> {
        let code = acs::acs_code(acs_name)?;
        let acsc = self.get_string(names::ACS_CHARS)?;
        acs::parse_acsc(acsc).get(&code).copied()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`TerminalCapabilities`].
#[derive(Debug, Clone)]
pub struct CapabilitiesBuilder {
    caps: TerminalCapabilities,
}

impl CapabilitiesBuilder {
    /// Adds an alternate name.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.caps.names.push(name.into());
        self
    }

    /// Sets a boolean capability.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.caps.booleans.insert(name.into(), true);
        self
    }

    /// Sets a numeric capability.
    #[must_use]
    pub fn number(mut self, name: impl Into<String>, value: i32) -> Self {
        self.caps.numbers.insert(name.into(), value);
        self
    }

    /// Sets a string capability.
    #[must_use]
    pub fn string(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.caps.strings.insert(name.into(), value.into());
        self
    }

    /// Removes a capability of any kind.
    #[must_use]
    pub fn remove(mut self, name: &str) -> Self {
        self.caps.booleans.remove(name);
        self.caps.numbers.remove(name);
        self.caps.strings.remove(name);
        self
    }

    /// Finishes the profile.
    pub fn build(self) -> TerminalCapabilities {
        self.caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TerminalCapabilities {
        TerminalCapabilities::builder("sample")
            .alias("sample-alias")
            .flag("auto_right_margin")
            .number(names::MAX_COLORS, 256)
            .string(names::CURSOR_ADDRESS, "\x1b[%i%p1%d;%p2%dH")
            .string(names::SET_A_FOREGROUND, "\x1b[38;5;%p1%dm")
            .string(names::ACS_CHARS, "qqxxl+")
            .build()
    }

    #[test]
    fn test_accessors() {
        let caps = sample();
        assert!(caps.get_flag("auto_right_margin"));
        assert!(!caps.get_flag("back_color_erase"));
        assert_eq!(caps.get_number(names::MAX_COLORS), Some(256));
        assert_eq!(caps.get_number(names::LINES), None);
        assert_eq!(caps.max_colors(), 256);
        assert!(caps.has_colors());
        assert!(caps.answers_to("sample-alias"));
        assert!(!caps.answers_to("other"));
    }

    #[test]
    fn test_expand_helpers() {
        let caps = sample();
        assert_eq!(caps.cursor_address(2, 3).unwrap(), "\x1b[3;4H");
        assert_eq!(caps.set_foreground(42).unwrap(), "\x1b[38;5;42m");
        assert_eq!(
            caps.set_background(1),
            Err(TparmError::MissingCapability("set_a_background".into()))
        );
    }

    #[test]
    fn test_acs_glyph() {
        let caps = sample();
        assert_eq!(caps.acs_glyph("hline"), Some('q'));
        assert_eq!(caps.acs_glyph("ulcorner"), Some('+'));
        assert_eq!(caps.acs_glyph("lrcorner"), None);
        assert_eq!(caps.acs_glyph("nonsense"), None);
    }

    #[test]
    fn test_extend_inherits_but_drops_aliases() {
        let base = sample();
        let derived = base
            .extend("derived")
            .number(names::MAX_COLORS, 8)
            .remove(names::ACS_CHARS)
            .build();
        assert_eq!(derived.name, "derived");
        assert!(derived.names.is_empty());
        assert_eq!(derived.max_colors(), 8);
        assert!(derived.get_string(names::CURSOR_ADDRESS).is_some());
        assert!(derived.get_string(names::ACS_CHARS).is_none());
    }

    #[test]
    fn test_monochrome() {
        let caps = TerminalCapabilities::builder("mono").build();
        assert_eq!(caps.max_colors(), 0);
        assert!(!caps.has_colors());
    }
}
