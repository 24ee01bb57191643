//! Tracing subscriber setup.
//!
//! The library crates only emit `tracing` events. Applications that want to
//! see them install a subscriber once at startup, either here or their own.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. With `json` set, events are
/// written as one JSON object per line, otherwise in the pretty format.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(level: &str, json: bool) {
    let subscriber = tracing_subscriber::registry().with(filter(level));

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Like [`init_logging`], but returns an error instead of panicking when a
/// subscriber is already installed.
pub fn try_init_logging(level: &str, json: bool) -> Result<(), TryInitError> {
    let subscriber = tracing_subscriber::registry().with(filter(level));

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
    }
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}
