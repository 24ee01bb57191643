//! Braille dot rasterizer.
//!
//! Each cell covers a 2x4 pixel block mapped onto the eight dots of a
//! Braille pattern (U+2800..U+28FF). A dot is raised when its pixel is
//! opaque and at least as bright as the threshold.

use crate::backend::{raster_bounds, Backend, BackendCapabilities, BackendKind, BackendOptions};
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::image::{blank_region, is_opaque, push_cursor, Image, Placement, Region};
use cortex_termio_color::{fg_256, rgb_to_color256, sgr, Rgb, SGR_RESET};

const BRAILLE_BASE: u32 = 0x2800;
const BLANK: char = '\u{2800}';

/// Default luminance at which a dot is raised.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Dot bit for each (x, y) offset inside a cell.
const DOTS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// Draws an image as Braille patterns starting at the placement cell.
///
/// With `color` set, each cell's foreground is the 256-color quantization of
/// the average of its raised dots.
pub fn render_braille(image: &Image, placement: &Placement, threshold: u8, color: bool) -> String {
    let mut out = String::new();
    let cols = image.width().div_ceil(2);
    let rows = image.height().div_ceil(4);

    for row in 0..rows {
        push_cursor(&mut out, u32::from(placement.row) + row, placement.col);
        let mut current: Option<u8> = None;

        for col in 0..cols {
            let mut bits = 0u8;
            let mut sum = [0u32; 3];
            let mut lit = 0u32;
            for (dx, column) in DOTS.iter().enumerate() {
                for (dy, &bit) in column.iter().enumerate() {
                    let pixel = image.pixel(col * 2 + dx as u32, row * 4 + dy as u32);
                    let rgb = Rgb::new(pixel[0], pixel[1], pixel[2]);
                    if is_opaque(pixel) && rgb.luma() >= threshold {
                        bits |= bit;
                        sum[0] += u32::from(pixel[0]);
                        sum[1] += u32::from(pixel[1]);
                        sum[2] += u32::from(pixel[2]);
                        lit += 1;
                    }
                }
            }

            if color && lit > 0 {
                let average = Rgb::new(
                    (sum[0] / lit) as u8,
                    (sum[1] / lit) as u8,
                    (sum[2] / lit) as u8,
                );
                let index = rgb_to_color256(average);
                if current != Some(index) {
                    out.push_str(&sgr(&[fg_256(index)]));
                    current = Some(index);
                }
            }
            out.push(char::from_u32(BRAILLE_BASE + u32::from(bits)).unwrap_or(BLANK));
        }

        if current.is_some() {
            out.push_str(SGR_RESET);
        }
    }
    out
}

/// Braille glyph backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrailleBackend {
    color: bool,
    threshold: u8,
    max_width: Option<u32>,
    max_height: Option<u32>,
    supported: bool,
}

impl BrailleBackend {
    /// Creates the backend from an environment snapshot.
    ///
    /// Color is used unless `NO_COLOR` is set or no color signal is present.
    pub fn new(env: &EnvSnapshot, options: &BackendOptions) -> Self {
        let (cols, rows) = options.cell_limits(env);
        Self {
            color: env.ansi_signal().is_some(),
            threshold: DEFAULT_THRESHOLD,
            max_width: cols.map(|cols| cols.saturating_mul(2)),
            max_height: rows.map(|rows| rows.saturating_mul(4)),
            supported: env.is_utf8_locale(),
        }
    }

    /// Sets the luminance threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns true if cells are colored.
    pub fn color(&self) -> bool {
        self.color
    }
}

impl Backend for BrailleBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Braille
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
        let (max_width, max_height) = raster_bounds(&self.capabilities(), placement, 2, 4);
        let image = image.fit_within(max_width, max_height);
        Ok(render_braille(&image, placement, self.threshold, self.color))
    }

    fn clear(&self, region: Option<&Region>) -> String {
        region.map(blank_region).unwrap_or_default()
    }
}
