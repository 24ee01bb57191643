//! Termio configuration.
//!
//! Loaded from a TOML file, from `CORTEX_TERMIO_*` environment variables, or
//! both. Every field has a default, so an empty file is a valid config.

use std::path::{Path, PathBuf};

use cortex_termio_image::{BackendKind, BackendOptions, TruecolorMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum paste length in characters.
pub const ENV_PASTE_MAX: &str = "CORTEX_TERMIO_PASTE_MAX";
/// Image backend name, or `auto`.
pub const ENV_BACKEND: &str = "CORTEX_TERMIO_BACKEND";
/// Terminal name used instead of `$TERM`.
pub const ENV_TERM: &str = "CORTEX_TERMIO_TERM";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// `image.backend` names no known backend.
    #[error("unknown image backend: {0}")]
    UnknownBackend(String),

    /// `image.truecolor` is not `auto`, `always` or `never`.
    #[error("unknown truecolor mode: {0}")]
    UnknownTruecolorMode(String),

    /// An environment override could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Result type for configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermioConfig {
    /// Bracketed paste handling.
    #[serde(default)]
    pub paste: PasteConfig,

    /// Capability resolution.
    #[serde(default)]
    pub terminal: TerminalConfig,

    /// Image output.
    #[serde(default)]
    pub image: ImageConfig,
}

/// Bracketed paste handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteConfig {
    /// Maximum characters kept per paste, 0 for unlimited.
    #[serde(default)]
    pub max_length: usize,

    /// Strip escape sequences from completed pastes.
    #[serde(default = "default_true")]
    pub sanitize: bool,
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self {
            max_length: 0,
            sanitize: true,
        }
    }
}

/// Capability resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Terminal name to resolve instead of `$TERM`.
    #[serde(default)]
    pub term: Option<String>,
}

/// Image output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Backend name, or `auto` to detect one.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Base64 bytes per Kitty chunk.
    #[serde(default = "default_kitty_chunk_size")]
    pub kitty_chunk_size: usize,

    /// ANSI color depth: `auto`, `always` or `never`.
    #[serde(default = "default_truecolor")]
    pub truecolor: String,

    /// Raster width limit in cells.
    #[serde(default)]
    pub max_columns: Option<u32>,

    /// Raster height limit in cells.
    #[serde(default)]
    pub max_rows: Option<u32>,
}

fn default_true() -> bool {
    true
}

fn default_backend() -> String {
    "auto".to_string()
}

fn default_kitty_chunk_size() -> usize {
    cortex_termio_image::kitty::DEFAULT_CHUNK_SIZE
}

fn default_truecolor() -> String {
    "auto".to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            kitty_chunk_size: default_kitty_chunk_size(),
            truecolor: default_truecolor(),
            max_columns: None,
            max_rows: None,
        }
    }
}

impl ImageConfig {
    /// Forced backend, `None` for `auto`.
    pub fn forced_backend(&self) -> Result<Option<BackendKind>> {
        let name = self.backend.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("auto") {
            return Ok(None);
        }
        name.parse()
            .map(Some)
            .map_err(|_| ConfigError::UnknownBackend(self.backend.clone()))
    }

    /// Parsed truecolor mode.
    pub fn truecolor_mode(&self) -> Result<TruecolorMode> {
        self.truecolor
            .parse()
            .map_err(|_| ConfigError::UnknownTruecolorMode(self.truecolor.clone()))
    }

    /// Converts to the options consumed by backend selection.
    pub fn backend_options(&self) -> Result<BackendOptions> {
        Ok(BackendOptions {
            forced: self.forced_backend()?,
            kitty_chunk_size: self.kitty_chunk_size,
            truecolor: self.truecolor_mode()?,
            max_columns: self.max_columns,
            max_rows: self.max_rows,
        })
    }
}

impl TermioConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from defaults and process environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Applies `CORTEX_TERMIO_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PASTE_MAX) {
            self.paste.max_length = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_PASTE_MAX,
                value: value.clone(),
            })?;
        }

        if let Some(backend) = lookup(ENV_BACKEND) {
            self.image.backend = backend;
        }

        if let Some(term) = lookup(ENV_TERM).filter(|t| !t.trim().is_empty()) {
            self.terminal.term = Some(term);
        }

        self.validate()
    }

    /// Checks the string-typed fields.
    pub fn validate(&self) -> Result<()> {
        self.image.backend_options().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    mod parse_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_file_is_default() {
            assert_eq!(TermioConfig::from_toml_str("").unwrap(), TermioConfig::default());
        }

        #[test]
        fn test_full_file() {
            let config = TermioConfig::from_toml_str(
                r#"
                [paste]
                max_length = 100
                sanitize = false

                [terminal]
                term = "screen"

                [image]
                backend = "sixel"
                kitty_chunk_size = 1024
                truecolor = "never"
                max_columns = 40
                "#,
            )
            .unwrap();

            assert_eq!(config.paste.max_length, 100);
            assert!(!config.paste.sanitize);
            assert_eq!(config.terminal.term.as_deref(), Some("screen"));

            let options = config.image.backend_options().unwrap();
            assert_eq!(options.forced, Some(BackendKind::Sixel));
            assert_eq!(options.kitty_chunk_size, 1024);
            assert_eq!(options.truecolor, TruecolorMode::Never);
            assert_eq!(options.max_columns, Some(40));
            assert_eq!(options.max_rows, None);
        }

        #[test]
        fn test_partial_section_keeps_defaults() {
            let config = TermioConfig::from_toml_str("[paste]\nmax_length = 5\n").unwrap();
            assert!(config.paste.sanitize);
            assert_eq!(config.image, ImageConfig::default());
        }

        #[test]
        fn test_invalid_values() {
            assert!(matches!(
                TermioConfig::from_toml_str("[image]\nbackend = \"vga\"\n"),
                Err(ConfigError::UnknownBackend(name)) if name == "vga"
            ));
            assert!(matches!(
                TermioConfig::from_toml_str("[image]\ntruecolor = \"maybe\"\n"),
                Err(ConfigError::UnknownTruecolorMode(_))
            ));
            assert!(matches!(
                TermioConfig::from_toml_str("[paste]\nmax_length = -1\n"),
                Err(ConfigError::Parse(_))
            ));
        }

        #[test]
        fn test_auto_backend() {
            let image = ImageConfig {
                backend: "AUTO".into(),
                ..ImageConfig::default()
            };
            assert_eq!(image.forced_backend().unwrap(), None);
        }
    }

    mod env_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
            let map: HashMap<String, String> = pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect();
            move |name| map.get(name).cloned()
        }

        #[test]
        fn test_overrides() {
            let mut config = TermioConfig::default();
            config
                .apply_env(lookup(&[
                    (ENV_PASTE_MAX, " 64 "),
                    (ENV_BACKEND, "braille"),
                    (ENV_TERM, "linux"),
                ]))
                .unwrap();

            assert_eq!(config.paste.max_length, 64);
            assert_eq!(config.image.backend, "braille");
            assert_eq!(config.terminal.term.as_deref(), Some("linux"));
        }

        #[test]
        fn test_empty_term_ignored() {
            let mut config = TermioConfig::default();
            config.apply_env(lookup(&[(ENV_TERM, "")])).unwrap();
            assert_eq!(config.terminal.term, None);
        }

        #[test]
        fn test_bad_overrides() {
            let mut config = TermioConfig::default();
            assert!(matches!(
                config.apply_env(lookup(&[(ENV_PASTE_MAX, "lots")])),
                Err(ConfigError::InvalidEnv { name: ENV_PASTE_MAX, .. })
            ));

            let mut config = TermioConfig::default();
            assert!(matches!(
                config.apply_env(lookup(&[(ENV_BACKEND, "gif")])),
                Err(ConfigError::UnknownBackend(_))
            ));
        }
    }
}
