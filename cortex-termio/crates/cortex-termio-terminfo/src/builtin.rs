//! Built-in capability profiles and name resolution.
//!
//! The table is built once on first use and never mutated afterwards, so it
//! can be read from any number of threads without synchronization.

#![allow(clippy::non_std_lazy_statics)]

use crate::capabilities::{names, TerminalCapabilities};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use tracing::debug;

/// Profile returned when nothing else matches.
pub const DEFAULT_TERMINAL: &str = "xterm-256color";

const CUP: &str = "\x1b[%i%p1%d;%p2%dH";
const VT100_ACSC: &str = "``aaffggjjkkllmmnnooppqqrrssttuuvvwwxxyyzz{{||}}~~";
const XTERM_ACSC: &str = "``aaffggiijjkkllmmnnooppqqrrssttuuvvwwxxyyzz{{||}}~~";
const LINUX_ACSC: &str = "++,,--..00__``aaffgghhiijjkkllmmnnooppqqrrssttuuvvwwxxyyzz{{||}}~~";

const SETAF_8: &str = "\x1b[3%p1%dm";
const SETAB_8: &str = "\x1b[4%p1%dm";
const SETAF_16: &str = "\x1b[%?%p1%{8}%<%t%p1%{30}%+%e%p1%{82}%+%;%dm";
const SETAB_16: &str = "\x1b[%?%p1%{8}%<%t%p1%{40}%+%e%p1%{92}%+%;%dm";
const SETAF_256: &str = "\x1b[%?%p1%{8}%<%t3%p1%d%e%p1%{16}%<%t9%p1%{8}%-%d%e38;5;%p1%d%;m";
const SETAB_256: &str = "\x1b[%?%p1%{8}%<%t4%p1%d%e%p1%{16}%<%t10%p1%{8}%-%d%e48;5;%p1%d%;m";

// ============================================================================
// Profile definitions
// ============================================================================

fn with_function_keys(
    builder: crate::capabilities::CapabilitiesBuilder,
    f1_to_f4: [&str; 4],
) -> crate::capabilities::CapabilitiesBuilder {
    let tail = [
        "\x1b[15~", "\x1b[17~", "\x1b[18~", "\x1b[19~", "\x1b[20~", "\x1b[21~", "\x1b[23~",
        "\x1b[24~",
    ];
    f1_to_f4
        .iter()
        .chain(tail.iter())
        .enumerate()
        .fold(builder, |b, (i, seq)| b.string(format!("key_f{}", i + 1), *seq))
}

fn vt100() -> TerminalCapabilities {
    TerminalCapabilities::builder("vt100")
        .alias("vt100-am")
        .alias("vt102")
        .flag("auto_right_margin")
        .flag("move_insert_mode")
        .flag("xon_xoff")
        .number(names::COLUMNS, 80)
        .number(names::LINES, 24)
        .string(names::CURSOR_ADDRESS, CUP)
        .string(names::CURSOR_HOME, "\x1b[H")
        .string(names::CLEAR_SCREEN, "\x1b[H\x1b[J")
        .string(names::ENTER_BOLD_MODE, "\x1b[1m")
        .string(names::ENTER_UNDERLINE_MODE, "\x1b[4m")
        .string(names::ENTER_REVERSE_MODE, "\x1b[7m")
        .string(names::EXIT_ATTRIBUTE_MODE, "\x1b[m\x0f")
        .string(names::ACS_CHARS, VT100_ACSC)
        .string(names::ENTER_ALT_CHARSET_MODE, "\x0e")
        .string(names::EXIT_ALT_CHARSET_MODE, "\x0f")
        .string("key_f1", "\x1bOP")
        .string("key_f2", "\x1bOQ")
        .string("key_f3", "\x1bOR")
        .string("key_f4", "\x1bOS")
        .build()
}

fn vt220() -> TerminalCapabilities {
    let builder = vt100()
        .extend("vt220")
        .alias("vt200")
        .string(names::EXIT_ATTRIBUTE_MODE, "\x1b[m\x1b(B")
        .string(names::ENTER_ALT_CHARSET_MODE, "\x1b(0")
        .string(names::EXIT_ALT_CHARSET_MODE, "\x1b(B");
    with_function_keys(builder, ["\x1bOP", "\x1bOQ", "\x1bOR", "\x1bOS"]).build()
}

fn xterm() -> TerminalCapabilities {
    let builder = TerminalCapabilities::builder("xterm")
        .alias("xterm-color")
        .alias("xterm-8color")
        .flag("auto_right_margin")
        .flag("back_color_erase")
        .flag("has_meta_key")
        .flag("move_insert_mode")
        .flag("move_standout_mode")
        .flag("eat_newline_glitch")
        .number(names::COLUMNS, 80)
        .number(names::LINES, 24)
        .number(names::MAX_COLORS, 8)
        .number("max_pairs", 64)
        .string(names::CURSOR_ADDRESS, CUP)
        .string(names::CURSOR_HOME, "\x1b[H")
        .string(names::CLEAR_SCREEN, "\x1b[H\x1b[2J")
        .string(names::ENTER_CA_MODE, "\x1b[?1049h\x1b[22;0;0t")
        .string(names::EXIT_CA_MODE, "\x1b[?1049l\x1b[23;0;0t")
        .string(names::SET_A_FOREGROUND, SETAF_8)
        .string(names::SET_A_BACKGROUND, SETAB_8)
        .string(names::ORIG_PAIR, "\x1b[39;49m")
        .string(names::ENTER_BOLD_MODE, "\x1b[1m")
        .string(names::ENTER_UNDERLINE_MODE, "\x1b[4m")
        .string(names::ENTER_REVERSE_MODE, "\x1b[7m")
        .string("enter_italics_mode", "\x1b[3m")
        .string(names::EXIT_ATTRIBUTE_MODE, "\x1b(B\x1b[m")
        .string(names::ACS_CHARS, XTERM_ACSC)
        .string(names::ENTER_ALT_CHARSET_MODE, "\x1b(0")
        .string(names::EXIT_ALT_CHARSET_MODE, "\x1b(B");
    with_function_keys(builder, ["\x1bOP", "\x1bOQ", "\x1bOR", "\x1bOS"]).build()
}

fn xterm_16color(base: &TerminalCapabilities) -> TerminalCapabilities {
    base.extend("xterm-16color")
        .number(names::MAX_COLORS, 16)
        .number("max_pairs", 256)
        .string(names::SET_A_FOREGROUND, SETAF_16)
        .string(names::SET_A_BACKGROUND, SETAB_16)
        .build()
}

fn xterm_256color(base: &TerminalCapabilities) -> TerminalCapabilities {
    base.extend(DEFAULT_TERMINAL)
        .alias("konsole")
        .alias("gnome")
        .alias("gnome-256color")
        .alias("vte")
        .alias("vte-256color")
        .alias("iterm")
        .alias("iterm2")
        .alias("alacritty")
        .alias("wezterm")
        .alias("kitty")
        .alias("xterm-kitty")
        .alias("ghostty")
        .alias("xterm-ghostty")
        .alias("foot")
        .number(names::MAX_COLORS, 256)
        .number("max_pairs", 65536)
        .string(names::SET_A_FOREGROUND, SETAF_256)
        .string(names::SET_A_BACKGROUND, SETAB_256)
        .build()
}

fn screen() -> TerminalCapabilities {
    let builder = TerminalCapabilities::builder("screen")
        .flag("auto_right_margin")
        .flag("move_insert_mode")
        .flag("move_standout_mode")
        .number(names::COLUMNS, 80)
        .number(names::LINES, 24)
        .number(names::MAX_COLORS, 8)
        .number("max_pairs", 64)
        .string(names::CURSOR_ADDRESS, CUP)
        .string(names::CURSOR_HOME, "\x1b[H")
        .string(names::CLEAR_SCREEN, "\x1b[H\x1b[J")
        .string(names::ENTER_CA_MODE, "\x1b[?1049h")
        .string(names::EXIT_CA_MODE, "\x1b[?1049l")
        .string(names::SET_A_FOREGROUND, SETAF_8)
        .string(names::SET_A_BACKGROUND, SETAB_8)
        .string(names::ORIG_PAIR, "\x1b[39;49m")
        .string(names::ENTER_BOLD_MODE, "\x1b[1m")
        .string(names::ENTER_UNDERLINE_MODE, "\x1b[4m")
        .string(names::ENTER_REVERSE_MODE, "\x1b[7m")
        .string(names::EXIT_ATTRIBUTE_MODE, "\x1b[m\x0f")
        .string(names::ACS_CHARS, XTERM_ACSC)
        .string(names::ENTER_ALT_CHARSET_MODE, "\x0e")
        .string(names::EXIT_ALT_CHARSET_MODE, "\x0f");
    with_function_keys(builder, ["\x1bOP", "\x1bOQ", "\x1bOR", "\x1bOS"]).build()
}

fn screen_256color(base: &TerminalCapabilities) -> TerminalCapabilities {
    base.extend("screen-256color")
        .number(names::MAX_COLORS, 256)
        .number("max_pairs", 65536)
        .string(names::SET_A_FOREGROUND, SETAF_256)
        .string(names::SET_A_BACKGROUND, SETAB_256)
        .build()
}

fn tmux(base: &TerminalCapabilities) -> TerminalCapabilities {
    base.extend("tmux")
        .string("enter_italics_mode", "\x1b[3m")
        .string("exit_italics_mode", "\x1b[23m")
        .build()
}

fn tmux_256color(base: &TerminalCapabilities) -> TerminalCapabilities {
    base.extend("tmux-256color")
        .string("enter_italics_mode", "\x1b[3m")
        .string("exit_italics_mode", "\x1b[23m")
        .build()
}

fn linux() -> TerminalCapabilities {
    let builder = TerminalCapabilities::builder("linux")
        .alias("linux-console")
        .flag("auto_right_margin")
        .flag("back_color_erase")
        .flag("move_insert_mode")
        .flag("move_standout_mode")
        .number(names::MAX_COLORS, 8)
        .number("max_pairs", 64)
        .string(names::CURSOR_ADDRESS, CUP)
        .string(names::CURSOR_HOME, "\x1b[H")
        .string(names::CLEAR_SCREEN, "\x1b[H\x1b[J")
        .string(names::SET_A_FOREGROUND, SETAF_8)
        .string(names::SET_A_BACKGROUND, SETAB_8)
        .string(names::ORIG_PAIR, "\x1b[39;49m")
        .string(names::ENTER_BOLD_MODE, "\x1b[1m")
        .string(names::ENTER_UNDERLINE_MODE, "\x1b[4m")
        .string(names::ENTER_REVERSE_MODE, "\x1b[7m")
        .string(names::EXIT_ATTRIBUTE_MODE, "\x1b[m\x0f")
        .string(names::ACS_CHARS, LINUX_ACSC)
        .string(names::ENTER_ALT_CHARSET_MODE, "\x0e")
        .string(names::EXIT_ALT_CHARSET_MODE, "\x0f");
    with_function_keys(builder, ["\x1b[[A", "\x1b[[B", "\x1b[[C", "\x1b[[D"])
        .string("key_f5", "\x1b[[E")
        .build()
}

fn build_profiles() -> Vec<TerminalCapabilities> {
    let xterm = xterm();
    let xterm_256 = xterm_256color(&xterm);
    let screen = screen();
    let screen_256 = screen_256color(&screen);
    vec![
        xterm_16color(&xterm),
        tmux(&screen),
        tmux_256color(&screen_256),
        xterm,
        xterm_256,
        screen,
        screen_256,
        vt100(),
        vt220(),
        linux(),
    ]
}

// ============================================================================
// Table
// ============================================================================

static BUILTIN_PROFILES: Lazy<Vec<TerminalCapabilities>> = Lazy::new(build_profiles);

/// Canonical names and aliases, each mapped to its profile.
static BUILTIN_INDEX: Lazy<AHashMap<&'static str, &'static TerminalCapabilities>> =
    Lazy::new(|| {
        let mut index = AHashMap::new();
        for caps in BUILTIN_PROFILES.iter() {
            index.insert(caps.name.as_str(), caps);
            for alias in &caps.names {
                index.entry(alias.as_str()).or_insert(caps);
            }
        }
        index
    });

static FALLBACK: Lazy<&'static TerminalCapabilities> = Lazy::new(|| {
    BUILTIN_PROFILES
        .iter()
        .find(|caps| caps.name == DEFAULT_TERMINAL)
        .unwrap_or(&BUILTIN_PROFILES[0])
});

/// Exact lookup by canonical name or alias.
pub fn get_builtin_terminfo(name: &str) -> Option<&'static TerminalCapabilities> {
    BUILTIN_INDEX.get(name).copied()
}

/// Returns true if `name` is a built-in profile or alias.
pub fn has_builtin_terminfo(name: &str) -> bool {
    BUILTIN_INDEX.contains_key(name)
}

/// Resolves a terminal name to the closest built-in profile.
///
/// Tries the exact name first, then strips trailing `-suffix` components one
/// at a time (`xterm-256color-italic` -> `xterm-256color` -> `xterm`), and
/// finally falls back to [`DEFAULT_TERMINAL`]. Never fails.
pub fn get_best_builtin_terminfo(name: &str) -> &'static TerminalCapabilities {
    let name = name.trim();
    let mut candidate = name;
    loop {
        if let Some(caps) = get_builtin_terminfo(candidate) {
            if candidate != name {
                debug!(requested = name, resolved = %caps.name, "terminal resolved by suffix stripping");
            }
            return caps;
        }
        match candidate.rfind('-') {
            Some(pos) => candidate = &candidate[..pos],
            None => break,
        }
    }
    debug!(requested = name, fallback = DEFAULT_TERMINAL, "unknown terminal, using fallback profile");
    *FALLBACK
}

/// Iterates over the canonical names of all built-in profiles.
pub fn builtin_terminal_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_PROFILES.iter().map(|caps| caps.name.as_str())
}

/// Iterates over all built-in profiles.
pub fn builtin_profiles() -> impl Iterator<Item = &'static TerminalCapabilities> {
    BUILTIN_PROFILES.iter()
}
