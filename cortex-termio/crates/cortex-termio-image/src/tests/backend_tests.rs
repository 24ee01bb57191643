//! Every backend honours the shared contract.

use crate::backend::{select_backend, Backend, BackendKind, BackendOptions, ImageBackend};
use crate::env::EnvSnapshot;
use crate::image::{Image, Placement, Region};
use pretty_assertions::assert_eq;

fn gradient() -> Image {
    Image::from_fn(16, 16, |x, y| [(x * 16) as u8, (y * 16) as u8, 128, 255]).unwrap()
}

fn all_backends(env: &EnvSnapshot) -> Vec<ImageBackend> {
    BackendKind::PRIORITY
        .into_iter()
        .map(|kind| ImageBackend::new(kind, env, &BackendOptions::default()))
        .collect()
}

#[test]
fn test_every_backend_renders_and_clears() {
    let env = EnvSnapshot::from_pairs([("TERM", "xterm-256color"), ("LANG", "en_US.UTF-8")]);
    for backend in all_backends(&env) {
        let out = backend.render(&gradient(), &Placement::at(1, 2)).unwrap();
        assert!(out.starts_with("\x1b[2;3H"), "{}", backend.name());
        assert!(!backend.clear(Some(&Region::new(0, 0, 1, 1))).is_empty(), "{}", backend.name());
    }
}

#[test]
fn test_kinds_and_names_agree() {
    for backend in all_backends(&EnvSnapshot::default()) {
        assert_eq!(backend.name(), backend.kind().name());
        assert!(backend.capabilities().static_images);
    }
}

#[test]
fn test_protocol_backends_are_unbounded() {
    let env = EnvSnapshot::from_pairs([("COLUMNS", "80"), ("LINES", "24")]);
    for backend in all_backends(&env) {
        let caps = backend.capabilities();
        match backend.kind() {
            BackendKind::Kitty | BackendKind::ITerm2 | BackendKind::Sixel => {
                assert_eq!((caps.max_width, caps.max_height), (None, None));
            }
            BackendKind::Ansi => assert_eq!((caps.max_width, caps.max_height), (Some(80), Some(48))),
            BackendKind::Braille => {
                assert_eq!((caps.max_width, caps.max_height), (Some(160), Some(96)));
            }
        }
    }
}

#[test]
fn test_options_override_terminal_size() {
    let env = EnvSnapshot::from_pairs([("COLUMNS", "80"), ("LINES", "24")]);
    let options = BackendOptions {
        forced: Some(BackendKind::Ansi),
        max_columns: Some(4),
        max_rows: Some(2),
        ..BackendOptions::default()
    };
    let backend = select_backend(&env, &options);
    let out = backend.render(&gradient(), &Placement::default()).unwrap();
    assert_eq!(out.matches("\x1b[0m").count(), 2);
    assert!(out.split("\x1b[0m").all(|row| row.matches('▀').count() <= 4));
}

#[test]
fn test_detected_backend_wins() {
    let cases = [
        (vec![("TERM", "xterm-kitty")], BackendKind::Kitty),
        (vec![("LC_TERMINAL", "iTerm2")], BackendKind::ITerm2),
        (vec![("TERM", "xterm"), ("XTERM_VERSION", "XTerm(388)")], BackendKind::Sixel),
        (vec![("COLORTERM", "truecolor")], BackendKind::Ansi),
        (vec![("NO_COLOR", "1"), ("LANG", "en_US.UTF-8")], BackendKind::Braille),
    ];
    for (pairs, expected) in cases {
        let env = EnvSnapshot::from_pairs(pairs);
        let backend = select_backend(&env, &BackendOptions::default());
        assert_eq!(backend.kind(), expected);
        assert!(backend.is_supported());
    }
}
