//! Cross-module decoding tests.
