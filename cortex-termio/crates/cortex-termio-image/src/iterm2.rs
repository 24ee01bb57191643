//! iTerm2 inline images (`OSC 1337 ; File=`).

use crate::backend::{Backend, BackendCapabilities, BackendKind};
use crate::codec::{encode_base64, encode_png};
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::image::{blank_region, cursor_position, Dimension, Image, Placement, Region};
use std::fmt::Write as _;

/// Parameters of an inline file transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ITerm2Options {
    /// File name, sent base64-encoded.
    pub name: Option<String>,
    /// Display the file instead of downloading it.
    pub inline: bool,
    /// Display width.
    pub width: Dimension,
    /// Display height.
    pub height: Dimension,
    /// Keep the aspect ratio when both dimensions are given.
    pub preserve_aspect_ratio: bool,
}

impl Default for ITerm2Options {
    fn default() -> Self {
        Self {
            name: None,
            inline: true,
            width: Dimension::Auto,
            height: Dimension::Auto,
            preserve_aspect_ratio: true,
        }
    }
}

impl From<&Placement> for ITerm2Options {
    fn from(placement: &Placement) -> Self {
        Self {
            name: placement.name.clone(),
            inline: true,
            width: placement.width,
            height: placement.height,
            preserve_aspect_ratio: placement.preserve_aspect_ratio,
        }
    }
}

/// Frames file contents as an iTerm2 inline image sequence.
///
/// `preserveAspectRatio` is only emitted when disabled, since enabled is
/// the terminal's default.
///
/// ```
/// use cortex_termio_image::{encode_iterm2_file, ITerm2Options};
///
/// let out = encode_iterm2_file(b"abc", &ITerm2Options::default());
/// assert_eq!(out, "\x1b]1337;File=size=3;inline=1;width=auto;height=auto:YWJj\x07");
/// ```
pub fn encode_iterm2_file(data: &[u8], options: &ITerm2Options) -> String {
    let mut params = format!("size={};inline={}", data.len(), u8::from(options.inline));
    if let Some(name) = &options.name {
        let _ = write!(params, ";name={}", encode_base64(name.as_bytes()));
    }
    let _ = write!(params, ";width={};height={}", options.width, options.height);
    if !options.preserve_aspect_ratio {
        params.push_str(";preserveAspectRatio=0");
    }
    format!("\x1b]1337;File={params}:{}\x07", encode_base64(data))
}

/// iTerm2 inline image backend. Images are transferred as PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ITerm2Backend {
    supported: bool,
}

impl ITerm2Backend {
    /// Creates the backend from an environment snapshot.
    pub fn new(env: &EnvSnapshot) -> Self {
        Self {
            supported: env.iterm2_signal().is_some(),
        }
    }
}

impl Backend for ITerm2Backend {
    fn kind(&self) -> BackendKind {
        BackendKind::ITerm2
    }

    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities {
            static_images: true,
            animation: true,
            alpha_channel: true,
            max_width: None,
            max_height: None,
        }
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn render(&self, image: &Image, placement: &Placement) -> Result<String> {
        let png = encode_png(image.pixels(), image.width(), image.height())?;
        let mut out = cursor_position(placement.row, placement.col);
        out.push_str(&encode_iterm2_file(&png, &ITerm2Options::from(placement)));
        Ok(out)
    }

    /// iTerm2 has no delete primitive, so a region is overwritten with spaces.
    fn clear(&self, region: Option<&Region>) -> String {
        region.map(blank_region).unwrap_or_default()
    }
}
