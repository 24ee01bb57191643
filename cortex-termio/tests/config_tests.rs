//! Loading configuration from files and the process environment.

use std::io::Write;

use cortex_termio::config::{ENV_BACKEND, ENV_PASTE_MAX, ENV_TERM};
use cortex_termio::{ConfigError, TerminalSession, TermioConfig};
use cortex_termio_image::{Backend, BackendKind, EnvSnapshot};
use pretty_assertions::assert_eq;
use serial_test::serial;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[paste]\nmax_length = 8\n\n[image]\nbackend = \"braille\"").unwrap();

    let config = TermioConfig::load(file.path()).unwrap();
    assert_eq!(config.paste.max_length, 8);
    assert_eq!(config.image.backend, "braille");
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("termio.toml");
    match TermioConfig::load(&path) {
        Err(ConfigError::Io { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_load_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[paste\nmax_length = 8").unwrap();
    assert!(matches!(
        TermioConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

fn clear_env() {
    for name in [ENV_PASTE_MAX, ENV_BACKEND, ENV_TERM] {
        std::env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    assert_eq!(TermioConfig::from_env().unwrap(), TermioConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides_drive_session() {
    clear_env();
    std::env::set_var(ENV_PASTE_MAX, "2");
    std::env::set_var(ENV_BACKEND, "sixel");
    std::env::set_var(ENV_TERM, "screen-256color");

    let config = TermioConfig::from_env();
    clear_env();
    let config = config.unwrap();

    let mut session = TerminalSession::new(EnvSnapshot::default(), &config).unwrap();
    assert_eq!(session.caps().name, "screen-256color");
    assert_eq!(session.backend().kind(), BackendKind::Sixel);

    let (events, rest) = session.feed_all(b"\x1b[200~hello\x1b[201~");
    assert_eq!(events[0].paste_text(), Some("he"));
    assert!(rest.is_empty());
}

#[test]
#[serial]
fn test_from_env_rejects_garbage() {
    clear_env();
    std::env::set_var(ENV_PASTE_MAX, "-5");
    let result = TermioConfig::from_env();
    clear_env();
    assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
}
