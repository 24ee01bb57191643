//! Backend contract, options and capability-driven selection.

use crate::ansi::AnsiBackend;
use crate::braille::BrailleBackend;
use crate::env::EnvSnapshot;
use crate::error::{ImageError, Result};
use crate::image::{Dimension, Image, Placement, Region};
use crate::iterm2::ITerm2Backend;
use crate::kitty::{KittyBackend, DEFAULT_CHUNK_SIZE};
use crate::sixel::SixelBackend;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

// ============================================================================
// Kinds
// ============================================================================

/// The closed set of image output backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Kitty graphics protocol.
    Kitty,
    /// iTerm2 inline images.
    ITerm2,
    /// DEC sixel graphics.
    Sixel,
    /// Half-block characters with SGR colors.
    Ansi,
    /// Braille dot patterns.
    Braille,
}

impl BackendKind {
    /// All kinds in selection priority order.
    pub const PRIORITY: [BackendKind; 5] = [
        BackendKind::Kitty,
        BackendKind::ITerm2,
        BackendKind::Sixel,
        BackendKind::Ansi,
        BackendKind::Braille,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Kitty => "kitty",
            BackendKind::ITerm2 => "iterm2",
            BackendKind::Sixel => "sixel",
            BackendKind::Ansi => "ansi",
            BackendKind::Braille => "braille",
        }
    }

    /// The environment variable that shows this backend is usable, if any.
    pub fn detect(self, env: &EnvSnapshot) -> Option<&'static str> {
        match self {
            BackendKind::Kitty => env.kitty_signal(),
            BackendKind::ITerm2 => env.iterm2_signal(),
            BackendKind::Sixel => env.sixel_signal(),
            BackendKind::Ansi => env.ansi_signal(),
            BackendKind::Braille => env.is_utf8_locale().then_some("locale"),
        }
    }

    /// Returns true if the environment supports this backend.
    pub fn is_supported(self, env: &EnvSnapshot) -> bool {
        self.detect(env).is_some()
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self> {
        BackendKind::PRIORITY
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ImageError::UnknownBackend(s.to_string()))
    }
}

// ============================================================================
// Options and capabilities
// ============================================================================

/// When the ANSI backend emits 24-bit colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruecolorMode {
    /// Follow `COLORTERM`.
    #[default]
    Auto,
    /// Always emit 24-bit SGR.
    Always,
    /// Always quantize to the 256-color palette.
    Never,
}

impl TruecolorMode {
    /// Resolves the mode against an environment.
    pub fn enabled(self, env: &EnvSnapshot) -> bool {
        match self {
            TruecolorMode::Auto => env.supports_truecolor(),
            TruecolorMode::Always => true,
            TruecolorMode::Never => false,
        }
    }
}

impl FromStr for TruecolorMode {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(TruecolorMode::Auto),
            "always" => Ok(TruecolorMode::Always),
            "never" => Ok(TruecolorMode::Never),
            _ => Err(ImageError::UnknownTruecolorMode(s.to_string())),
        }
    }
}

/// Construction-time settings shared by all backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOptions {
    /// Use this backend regardless of detection.
    pub forced: Option<BackendKind>,
    /// Base64 bytes per Kitty chunk.
    pub kitty_chunk_size: usize,
    /// ANSI color depth.
    pub truecolor: TruecolorMode,
    /// Raster width limit in cells, overriding `COLUMNS`.
    pub max_columns: Option<u32>,
    /// Raster height limit in cells, overriding `LINES`.
    pub max_rows: Option<u32>,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            forced: None,
            kitty_chunk_size: DEFAULT_CHUNK_SIZE,
            truecolor: TruecolorMode::Auto,
            max_columns: None,
            max_rows: None,
        }
    }
}

impl BackendOptions {
    /// Raster limits in cells from the options, falling back to the terminal size.
    pub(crate) fn cell_limits(&self, env: &EnvSnapshot) -> (Option<u32>, Option<u32>) {
        let size = env.terminal_size();
        (
            self.max_columns.or(size.map(|(cols, _)| cols)),
            self.max_rows.or(size.map(|(_, rows)| rows)),
        )
    }
}

/// What a backend can draw. Size limits are in source pixels, `None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendCapabilities {
    /// Still images.
    pub static_images: bool,
    /// Animated images.
    pub animation: bool,
    /// Partial transparency.
    pub alpha_channel: bool,
    /// Widest image drawn without downscaling.
    pub max_width: Option<u32>,
    /// Tallest image drawn without downscaling.
    pub max_height: Option<u32>,
}

/// Pixel bounds for a raster backend drawing `px_per_col` x `px_per_row`
/// pixels per cell. A placement sized in cells narrows the capability limit.
pub(crate) fn raster_bounds(
    caps: &BackendCapabilities,
    placement: &Placement,
    px_per_col: u32,
    px_per_row: u32,
) -> (Option<u32>, Option<u32>) {
    let narrow = |limit: Option<u32>, dim: Dimension, per_cell: u32| match dim {
        Dimension::Cells(cells) => {
            let cells = cells.saturating_mul(per_cell);
            Some(limit.map_or(cells, |limit| limit.min(cells)))
        }
        _ => limit,
    };
    (
        narrow(caps.max_width, placement.width, px_per_col),
        narrow(caps.max_height, placement.height, px_per_row),
    )
}

// ============================================================================
// Backend contract
// ============================================================================

/// Uniform contract implemented by every backend.
pub trait Backend {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Stable lowercase name.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// What the backend can draw.
    fn capabilities(&self) -> BackendCapabilities;

    /// Whether the environment it was built from supports it.
    fn is_supported(&self) -> bool;

    /// Escape sequences drawing `image` at `placement`.
    fn render(&self, image: &Image, placement: &Placement) -> Result<String>;

    /// Escape sequences removing drawn images, limited to `region` if given.
    fn clear(&self, region: Option<&Region>) -> String;
}

/// A constructed backend of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageBackend {
    /// Kitty graphics protocol.
    Kitty(KittyBackend),
    /// iTerm2 inline images.
    ITerm2(ITerm2Backend),
    /// DEC sixel graphics.
    Sixel(SixelBackend),
    /// Half-block characters.
    Ansi(AnsiBackend),
    /// Braille dot patterns.
    Braille(BrailleBackend),
}

impl ImageBackend {
    /// Builds a backend of the given kind from an environment snapshot.
    pub fn new(kind: BackendKind, env: &EnvSnapshot, options: &BackendOptions) -> Self {
        match kind {
            BackendKind::Kitty => ImageBackend::Kitty(KittyBackend::new(env, options)),
            BackendKind::ITerm2 => ImageBackend::ITerm2(ITerm2Backend::new(env)),
            BackendKind::Sixel => ImageBackend::Sixel(SixelBackend::new(env)),
            BackendKind::Ansi => ImageBackend::Ansi(AnsiBackend::new(env, options)),
            BackendKind::Braille => ImageBackend::Braille(BrailleBackend::new(env, options)),
        }
    }

    fn inner(&self) -> &dyn Backend {
        match self {
            ImageBackend::Kitty(b) => b,
            ImageBackend::ITerm2(b) => b,
            ImageBackend::Sixel(b) => b,
            ImageBackend::Ansi(b) => b,
            ImageBackend::Braille(b) => b,
        }
    }
}

impl Backend for ImageBackend {
    fn kind(&self) -> BackendKind {
        self.inner().kind()
    }

    fn capabilities(&self) -> BackendCapabilities {
        self.inner().capabilities()
    }

    fn is_supported(&self) -> bool {
        self.inner().is_supported()
    }

    fn render(&self, image: &Image, placement: &Placement) -> Result<String> {
        self.inner().render(image, placement)
    }

    fn clear(&self, region: Option<&Region>) -> String {
        self.inner().clear(region)
    }
}

// ============================================================================
// Selection
// ============================================================================

/// The highest-priority supported backend, Braille when nothing else is.
///
/// ```
/// use cortex_termio_image::{best_backend_kind, BackendKind, EnvSnapshot};
///
/// let env = EnvSnapshot::from_pairs([("TERM", "xterm-kitty")]);
/// assert_eq!(best_backend_kind(&env), BackendKind::Kitty);
/// ```
pub fn best_backend_kind(env: &EnvSnapshot) -> BackendKind {
    for kind in BackendKind::PRIORITY {
        if let Some(signal) = kind.detect(env) {
            debug!(backend = kind.name(), signal, "image backend detected");
            return kind;
        }
    }
    debug!("no image backend detected, falling back to braille");
    BackendKind::Braille
}

/// Name of [`best_backend_kind`].
pub fn get_best_backend_name(env: &EnvSnapshot) -> &'static str {
    best_backend_kind(env).name()
}

/// Builds the backend to use: the forced one if configured, else the best detected.
pub fn select_backend(env: &EnvSnapshot, options: &BackendOptions) -> ImageBackend {
    let kind = match options.forced {
        Some(kind) => {
            info!(backend = kind.name(), "image backend forced by configuration");
            kind
        }
        None => best_backend_kind(env),
    };
    ImageBackend::new(kind, env, options)
}
