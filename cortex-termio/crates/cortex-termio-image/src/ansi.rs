//! Half-block rasterizer.
//!
//! Each cell shows two vertically stacked pixels using `▀` (upper half
//! block): foreground for the top pixel, background for the bottom one.

use crate::backend::{raster_bounds, Backend, BackendCapabilities, BackendKind, BackendOptions};
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::image::{blank_region, is_opaque, push_cursor, Image, Placement, Region};
use cortex_termio_color::{
    bg_256, bg_truecolor, fg_256, fg_truecolor, rgb_to_color256, sgr, Rgb, SGR_RESET,
};

const UPPER_HALF: char = '▀';
const LOWER_HALF: char = '▄';
const DEFAULT_FG: &str = "39";
const DEFAULT_BG: &str = "49";

fn rgb(pixel: [u8; 4]) -> Rgb {
    Rgb::new(pixel[0], pixel[1], pixel[2])
}

/// Draws an image with half blocks starting at the placement cell.
///
/// Rows end with an SGR reset. Fully transparent cells are written as
/// spaces on the default background; an SGR sequence is only emitted when
/// the colors change from the previous cell.
pub fn render_half_blocks(image: &Image, placement: &Placement, truecolor: bool) -> String {
    let fg = |color: Option<Rgb>| match color {
        Some(c) if truecolor => fg_truecolor(c),
        Some(c) => fg_256(rgb_to_color256(c)),
        None => DEFAULT_FG.to_string(),
    };
    let bg = |color: Option<Rgb>| match color {
        Some(c) if truecolor => bg_truecolor(c),
        Some(c) => bg_256(rgb_to_color256(c)),
        None => DEFAULT_BG.to_string(),
    };

    let mut out = String::new();
    let rows = image.height().div_ceil(2);
    for row in 0..rows {
        push_cursor(&mut out, u32::from(placement.row) + row, placement.col);
        let mut current: Option<[String; 2]> = None;

        for x in 0..image.width() {
            let top = image.pixel(x, row * 2);
            let bottom = image.pixel(x, row * 2 + 1);
            let (glyph, fg_color, bg_color) = match (is_opaque(top), is_opaque(bottom)) {
                (true, true) => (UPPER_HALF, Some(rgb(top)), Some(rgb(bottom))),
                (true, false) => (UPPER_HALF, Some(rgb(top)), None),
                (false, true) => (LOWER_HALF, Some(rgb(bottom)), None),
                (false, false) => (' ', None, None),
            };

            let params = [fg(fg_color), bg(bg_color)];
            if current.as_ref() != Some(&params) {
                out.push_str(&sgr(&params));
                current = Some(params);
            }
            out.push(glyph);
        }
        out.push_str(SGR_RESET);
    }
    out
}

/// Half-block ANSI backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiBackend {
    truecolor: bool,
    max_width: Option<u32>,
    max_height: Option<u32>,
    supported: bool,
}

impl AnsiBackend {
    /// Creates the backend from an environment snapshot.
    pub fn new(env: &EnvSnapshot, options: &BackendOptions) -> Self {
        let (cols, rows) = options.cell_limits(env);
        Self {
            truecolor: options.truecolor.enabled(env),
            max_width: cols,
            max_height: rows.map(|rows| rows.saturating_mul(2)),
            supported: env.ansi_signal().is_some(),
        }
    }

    /// Returns true if 24-bit SGR is emitted.
    pub fn truecolor(&self) -> bool {
        self.truecolor
    }
}

impl Backend for AnsiBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Ansi
    }

    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities {
            static_images: true,
            animation: false,
            alpha_channel: false,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn render(&self, image: &Image, placement: &Placement) -> Result<String> {
        let (max_width, max_height) = raster_bounds(&self.capabilities(), placement, 1, 2);
        let image = image.fit_within(max_width, max_height);
        Ok(render_half_blocks(&image, placement, self.truecolor))
    }

    fn clear(&self, region: Option<&Region>) -> String {
        region.map(blank_region).unwrap_or_default()
    }
}
