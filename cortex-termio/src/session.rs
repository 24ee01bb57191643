//! Per-terminal session state.
//!
//! A [`TerminalSession`] ties the subsystems together for one terminal: the
//! resolved capability profile, the selected image backend and the paste
//! state of its input stream.

use cortex_termio_image::{select_backend, Backend, EnvSnapshot, ImageBackend};
use cortex_termio_input::{decode_input, InputEvent, PasteState};
use cortex_termio_terminfo::{get_best_builtin_terminfo, TerminalCapabilities, DEFAULT_TERMINAL};
use tracing::info;

use crate::config::{Result, TermioConfig};

/// Output of [`TerminalSession::feed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed<'a> {
    /// Decoded event, if the chunk started with one.
    pub event: Option<InputEvent>,
    /// Bytes not consumed by the decoder.
    pub remaining: &'a [u8],
}

/// Resolved terminal state for one input and output stream.
#[derive(Debug, Clone)]
pub struct TerminalSession {
    env: EnvSnapshot,
    caps: &'static TerminalCapabilities,
    backend: ImageBackend,
    paste: PasteState,
}

impl TerminalSession {
    /// Builds a session from an environment snapshot.
    ///
    /// The terminal profile comes from the config override, then `TERM`,
    /// then the default profile.
    pub fn new(env: EnvSnapshot, config: &TermioConfig) -> Result<Self> {
        let options = config.image.backend_options()?;

        let term = config
            .terminal
            .term
            .as_deref()
            .or_else(|| env.get("TERM"))
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TERMINAL);
        let caps = get_best_builtin_terminfo(term);
        let backend = select_backend(&env, &options);

        info!(
            term,
            profile = %caps.name,
            colors = caps.max_colors(),
            backend = backend.name(),
            "terminal session ready"
        );

        Ok(Self {
            env,
            caps,
            backend,
            paste: Self::fresh_paste_state(config),
        })
    }

    /// Builds a session from the process environment.
    pub fn from_env(config: &TermioConfig) -> Result<Self> {
        Self::new(EnvSnapshot::from_process(), config)
    }

    fn fresh_paste_state(config: &TermioConfig) -> PasteState {
        PasteState::new(config.paste.max_length).with_sanitize(config.paste.sanitize)
    }

    /// The environment the session was resolved from.
    pub fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    /// The resolved capability profile.
    pub fn caps(&self) -> &'static TerminalCapabilities {
        self.caps
    }

    /// The selected image backend.
    pub fn backend(&self) -> &ImageBackend {
        &self.backend
    }

    /// Current paste state.
    pub fn paste_state(&self) -> &PasteState {
        &self.paste
    }

    /// Drops any partial paste, keeping the configured limits.
    pub fn reset_paste(&mut self) {
        self.paste = self.paste.reset();
    }

    /// Decodes at most one event from the start of `buf`.
    pub fn feed<'a>(&mut self, buf: &'a [u8]) -> Feed<'a> {
        let step = decode_input(std::mem::take(&mut self.paste), buf);
        self.paste = step.state;
        Feed {
            event: step.event,
            remaining: step.remaining,
        }
    }

    /// Decodes events until the chunk is used up or unrecognized bytes are
    /// reached, returning the events and the unconsumed tail.
    pub fn feed_all<'a>(&mut self, buf: &'a [u8]) -> (Vec<InputEvent>, &'a [u8]) {
        let mut events = Vec::new();
        let mut rest = buf;
        while !rest.is_empty() {
            let Feed { event, remaining } = self.feed(rest);
            let Some(event) = event else {
                break;
            };
            events.push(event);
            rest = remaining;
        }
        (events, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_termio_image::BackendKind;
    use pretty_assertions::assert_eq;

    fn session(pairs: &[(&str, &str)], config: &TermioConfig) -> TerminalSession {
        TerminalSession::new(EnvSnapshot::from_pairs(pairs.iter().copied()), config).unwrap()
    }

    #[test]
    fn test_profile_resolution_order() {
        let config = TermioConfig::default();
        assert_eq!(session(&[("TERM", "screen")], &config).caps().name, "screen");
        assert_eq!(session(&[], &config).caps().name, DEFAULT_TERMINAL);
        assert_eq!(session(&[("TERM", "")], &config).caps().name, DEFAULT_TERMINAL);

        let mut config = TermioConfig::default();
        config.terminal.term = Some("linux".into());
        assert_eq!(session(&[("TERM", "screen")], &config).caps().name, "linux");
    }

    #[test]
    fn test_backend_selection() {
        let config = TermioConfig::default();
        let s = session(&[("TERM", "xterm-kitty")], &config);
        assert_eq!(s.backend().kind(), BackendKind::Kitty);

        let mut config = TermioConfig::default();
        config.image.backend = "ansi".into();
        let s = session(&[("TERM", "xterm-kitty")], &config);
        assert_eq!(s.backend().kind(), BackendKind::Ansi);

        config.image.backend = "bogus".into();
        assert!(TerminalSession::new(EnvSnapshot::default(), &config).is_err());
    }

    #[test]
    fn test_feed_keeps_paste_state() {
        let mut config = TermioConfig::default();
        config.paste.max_length = 3;
        let mut s = session(&[], &config);

        let feed = s.feed(b"\x1b[200~abc");
        assert_eq!(feed.remaining, b"");
        assert!(s.paste_state().is_pasting());

        let feed = s.feed(b"def\x1b[201~rest");
        assert_eq!(feed.event.as_ref().and_then(InputEvent::paste_text), Some("abc"));
        assert_eq!(feed.remaining, b"rest");
        assert!(!s.paste_state().is_pasting());
        assert_eq!(s.paste_state().max_length(), 3);
    }

    #[test]
    fn test_feed_all_stops_at_unknown_bytes() {
        let mut s = session(&[], &TermioConfig::default());
        let (events, rest) = s.feed_all(b"\x1b[I\x1b[<0;1;1M\x1b[200~hi\x1b[201~q");
        assert_eq!(events.len(), 3);
        assert_eq!(events[2].paste_text(), Some("hi"));
        assert_eq!(rest, b"q");
    }

    #[test]
    fn test_reset_paste() {
        let mut s = session(&[], &TermioConfig::default());
        s.feed(b"\x1b[200~partial");
        s.reset_paste();
        assert!(!s.paste_state().is_pasting());
        assert!(s.paste_state().buffer().is_empty());
    }
}
