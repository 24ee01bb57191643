//! Environment snapshot and terminal detection heuristics.
//!
//! Detection never touches the process environment directly. Variables are
//! captured once into an [`EnvSnapshot`] and every heuristic reads from that,
//! so selection is repeatable and testable with hand-built snapshots.

use cortex_termio_terminfo::get_builtin_terminfo;
use std::collections::BTreeMap;

/// Environment variables consulted by the detection heuristics.
pub mod vars {
    /// Terminal type.
    pub const TERM: &str = "TERM";
    /// Terminal emulator program name.
    pub const TERM_PROGRAM: &str = "TERM_PROGRAM";
    /// Terminal identification forwarded over SSH by iTerm2.
    pub const LC_TERMINAL: &str = "LC_TERMINAL";
    /// Set inside every Kitty window.
    pub const KITTY_WINDOW_ID: &str = "KITTY_WINDOW_ID";
    /// Set by XTerm itself.
    pub const XTERM_VERSION: &str = "XTERM_VERSION";
    /// Disables color output when present.
    pub const NO_COLOR: &str = "NO_COLOR";
    /// Default locale.
    pub const LANG: &str = "LANG";
    /// Locale override.
    pub const LC_ALL: &str = "LC_ALL";
    /// Color depth hint (`truecolor`, `24bit`).
    pub const COLORTERM: &str = "COLORTERM";
    /// Terminal width in cells.
    pub const COLUMNS: &str = "COLUMNS";
    /// Terminal height in cells.
    pub const LINES: &str = "LINES";

    /// Every variable captured by [`super::EnvSnapshot::from_process`].
    pub const ALL: &[&str] = &[
        TERM,
        TERM_PROGRAM,
        LC_TERMINAL,
        KITTY_WINDOW_ID,
        XTERM_VERSION,
        NO_COLOR,
        LANG,
        LC_ALL,
        COLORTERM,
        COLUMNS,
        LINES,
    ];
}

const ITERM2_PROGRAMS: &[&str] = &["iTerm.app", "iTerm2", "WezTerm", "mintty"];
const SIXEL_PROGRAMS: &[&str] = &["mlterm", "foot", "contour", "WezTerm"];

/// Immutable copy of the environment variables relevant to detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the detection variables from the current process.
    ///
    /// Values that are not valid UTF-8 are converted lossily so their
    /// presence is still observed.
    pub fn from_process() -> Self {
        let vars = vars::ALL
            .iter()
            .filter_map(|&name| {
                std::env::var_os(name)
                    .map(|value| (name.to_string(), value.to_string_lossy().into_owned()))
            })
            .collect();
        Self { vars }
    }

    /// Builds a snapshot from explicit pairs.
    ///
    /// ```
    /// use cortex_termio_image::EnvSnapshot;
    ///
    /// let env = EnvSnapshot::from_pairs([("TERM", "xterm-kitty")]);
    /// assert_eq!(env.get("TERM"), Some("xterm-kitty"));
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Returns true if the variable is present, even when empty.
    pub fn is_set(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Returns true if the variable is present and non-empty.
    pub fn is_non_empty(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_empty())
    }

    fn term(&self) -> &str {
        self.get(vars::TERM).unwrap_or("")
    }

    fn term_program(&self) -> &str {
        self.get(vars::TERM_PROGRAM).unwrap_or("")
    }

    // ========================================================================
    // Heuristics
    // ========================================================================

    /// Signal that identifies Kitty, if any.
    pub fn kitty_signal(&self) -> Option<&'static str> {
        if self.term() == "xterm-kitty" {
            Some(vars::TERM)
        } else if self.term_program() == "kitty" {
            Some(vars::TERM_PROGRAM)
        } else if self.is_set(vars::KITTY_WINDOW_ID) {
            Some(vars::KITTY_WINDOW_ID)
        } else {
            None
        }
    }

    /// Signal that identifies an iTerm2-compatible terminal, if any.
    pub fn iterm2_signal(&self) -> Option<&'static str> {
        if ITERM2_PROGRAMS.contains(&self.term_program()) {
            Some(vars::TERM_PROGRAM)
        } else if self
            .get(vars::LC_TERMINAL)
            .is_some_and(|t| ITERM2_PROGRAMS.contains(&t))
        {
            Some(vars::LC_TERMINAL)
        } else {
            None
        }
    }

    /// Signal that identifies a Sixel-capable terminal, if any.
    pub fn sixel_signal(&self) -> Option<&'static str> {
        let term = self.term();
        if term.starts_with("xterm") && self.is_set(vars::XTERM_VERSION) {
            Some(vars::XTERM_VERSION)
        } else if SIXEL_PROGRAMS.contains(&self.term_program()) {
            Some(vars::TERM_PROGRAM)
        } else if term.contains("sixel") || term.contains("mlterm") {
            Some(vars::TERM)
        } else {
            None
        }
    }

    /// Signal that color output is wanted and understood, if any.
    ///
    /// `NO_COLOR` vetoes everything. Otherwise a truecolor hint, a
    /// `256color` terminal type, a known color-capable profile or a named
    /// terminal program is enough.
    pub fn ansi_signal(&self) -> Option<&'static str> {
        if self.is_set(vars::NO_COLOR) {
            return None;
        }
        let term = self.term();
        if self.supports_truecolor() {
            Some(vars::COLORTERM)
        } else if term.contains("256color")
            || get_builtin_terminfo(term).is_some_and(|caps| caps.has_colors())
        {
            Some(vars::TERM)
        } else if self.is_non_empty(vars::TERM_PROGRAM) {
            Some(vars::TERM_PROGRAM)
        } else {
            None
        }
    }

    /// Returns true if `COLORTERM` advertises 24-bit color.
    pub fn supports_truecolor(&self) -> bool {
        self.get(vars::COLORTERM).is_some_and(|v| {
            v.eq_ignore_ascii_case("truecolor") || v.eq_ignore_ascii_case("24bit")
        })
    }

    /// Returns true if the locale is UTF-8.
    ///
    /// The first non-empty of `LC_ALL` and `LANG` decides. Without any
    /// locale information UTF-8 is assumed.
    pub fn is_utf8_locale(&self) -> bool {
        [vars::LC_ALL, vars::LANG]
            .iter()
            .find_map(|&name| self.get(name).filter(|v| !v.is_empty()))
            .is_none_or(|locale| {
                let locale = locale.to_ascii_lowercase();
                locale.contains("utf-8") || locale.contains("utf8")
            })
    }

    /// Terminal size in cells from `COLUMNS` and `LINES`, when both parse.
    pub fn terminal_size(&self) -> Option<(u32, u32)> {
        let parse = |name| {
            self.get(name)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|&n| n > 0)
        };
        Some((parse(vars::COLUMNS)?, parse(vars::LINES)?))
    }
}
