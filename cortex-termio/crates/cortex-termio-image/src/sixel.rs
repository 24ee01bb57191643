//! Sixel graphics.
//!
//! Colors are quantized to the xterm 256-color palette, which doubles as the
//! register numbering. Each band of six pixel rows is emitted once per color
//! present in it, with runs compressed as `!<count><char>`. Transparent
//! pixels are left unpainted (P2 = 1).

use crate::backend::{Backend, BackendCapabilities, BackendKind};
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::image::{blank_region, cursor_position, is_opaque, Image, Placement, Region};
use cortex_termio_color::{color256_to_rgb, rgb_to_color256, Rgb};
use std::collections::BTreeSet;
use std::fmt::Write as _;

const DCS_START: &str = "\x1bP0;1;0q";
const ST: &str = "\x1b\\";
const BAND_HEIGHT: u32 = 6;
const SIXEL_BASE: u8 = 0x3f;
/// Shortest run written with the repeat introducer.
const MIN_REPEAT: usize = 4;

/// Encodes an image as a complete sixel DCS sequence.
pub fn encode_sixel(image: &Image) -> String {
    let (width, height) = (image.width(), image.height());

    let indices: Vec<Option<u8>> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            let [r, g, b, a] = image.pixel(x, y);
            is_opaque([r, g, b, a]).then(|| rgb_to_color256(Rgb::new(r, g, b)))
        })
        .collect();
    let index_at = |x: u32, y: u32| indices[y as usize * width as usize + x as usize];

    let mut out = String::from(DCS_START);
    let _ = write!(out, "\"1;1;{width};{height}");

    let used: BTreeSet<u8> = indices.iter().flatten().copied().collect();
    for &index in &used {
        let rgb = color256_to_rgb(index);
        let _ = write!(
            out,
            "#{index};2;{};{};{}",
            percent(rgb.r),
            percent(rgb.g),
            percent(rgb.b)
        );
    }

    let mut band_top = 0;
    while band_top < height {
        let band_bottom = (band_top + BAND_HEIGHT).min(height);
        let colors: BTreeSet<u8> = (band_top..band_bottom)
            .flat_map(|y| (0..width).filter_map(move |x| index_at(x, y)))
            .collect();

        for (n, &color) in colors.iter().enumerate() {
            if n > 0 {
                out.push('$');
            }
            let _ = write!(out, "#{color}");
            let line: Vec<u8> = (0..width)
                .map(|x| {
                    (band_top..band_bottom)
                        .enumerate()
                        .filter(|&(_, y)| index_at(x, y) == Some(color))
                        .fold(0u8, |bits, (bit, _)| bits | (1 << bit))
                })
                .collect();
            push_compressed(&mut out, &line);
        }

        band_top = band_bottom;
        if band_top < height {
            out.push('-');
        }
    }

    out.push_str(ST);
    out
}

fn percent(channel: u8) -> u32 {
    (u32::from(channel) * 100 + 127) / 255
}

/// Appends one color line, dropping trailing empty sixels.
fn push_compressed(out: &mut String, bits: &[u8]) {
    let end = bits.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let mut i = 0;
    while i < end {
        let value = bits[i];
        let run = bits[i..end].iter().take_while(|&&b| b == value).count();
        let ch = char::from(SIXEL_BASE + value);
        if run >= MIN_REPEAT {
            let _ = write!(out, "!{run}{ch}");
        } else {
            for _ in 0..run {
                out.push(ch);
            }
        }
        i += run;
    }
}

/// Sixel graphics backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SixelBackend {
    supported: bool,
}

impl SixelBackend {
    /// Creates the backend from an environment snapshot.
    pub fn new(env: &EnvSnapshot) -> Self {
        Self {
            supported: env.sixel_signal().is_some(),
        }
    }
}

impl Backend for SixelBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Sixel
    }

    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities {
            static_images: true,
            animation: false,
            alpha_channel: false,
            max_width: None,
            max_height: None,
        }
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn render(&self, image: &Image, placement: &Placement) -> Result<String> {
        let mut out = cursor_position(placement.row, placement.col);
        out.push_str(&encode_sixel(image));
        Ok(out)
    }

    /// Sixel output is plain cell content, so clearing overwrites it.
    fn clear(&self, region: Option<&Region>) -> String {
        region.map(blank_region).unwrap_or_default()
    }
}
