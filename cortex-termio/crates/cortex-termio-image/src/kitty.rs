//! Kitty graphics protocol.
//!
//! Images are sent as raw RGBA (`f=32`) inside APC sequences
//! (`ESC _ G <keys> ; <payload> ESC \`). Payloads larger than one chunk are
//! split, with `m=1` on every chunk but the last.
//!
//! Protocol: <https://sw.kovidgoyal.net/kitty/graphics-protocol/>

use crate::backend::{Backend, BackendCapabilities, BackendKind, BackendOptions};
use crate::codec::encode_base64;
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::image::{cursor_position, Dimension, Image, Placement, Region};
use std::fmt::Write as _;

/// Default base64 bytes per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

const APC_START: &str = "\x1b_G";
const ST: &str = "\x1b\\";

/// Encodes an image as a transmit-and-display command sequence.
///
/// The first chunk carries the control keys: action, format, pixel size,
/// optional image id and cell size. `chunk_size` is rounded down to a
/// multiple of 4 so chunks never split a base64 quantum.
///
/// ```
/// use cortex_termio_image::{encode_kitty, Image, Placement};
///
/// let image = Image::new(1, 1, vec![255, 0, 0, 255]).unwrap();
/// let out = encode_kitty(&image, &Placement::default(), 4096);
/// assert_eq!(out, "\x1b_Ga=T,f=32,s=1,v=1,q=2,m=0;/wAA/w==\x1b\\");
/// ```
pub fn encode_kitty(image: &Image, placement: &Placement, chunk_size: usize) -> String {
    let payload = encode_base64(image.pixels());
    let chunk_size = (chunk_size - chunk_size % 4).max(4);

    let mut keys = format!("a=T,f=32,s={},v={}", image.width(), image.height());
    if let Some(id) = placement.id {
        let _ = write!(keys, ",i={id}");
    }
    if let Dimension::Cells(cols) = placement.width {
        let _ = write!(keys, ",c={cols}");
    }
    if let Dimension::Cells(rows) = placement.height {
        let _ = write!(keys, ",r={rows}");
    }
    keys.push_str(",q=2");

    let mut out = String::with_capacity(payload.len() + payload.len() / chunk_size * 16 + 64);
    let mut start = 0;
    loop {
        let end = (start + chunk_size).min(payload.len());
        let more = u8::from(end < payload.len());
        out.push_str(APC_START);
        if start == 0 {
            out.push_str(&keys);
            out.push(',');
        }
        let _ = write!(out, "m={more};{}", &payload[start..end]);
        out.push_str(ST);
        if end == payload.len() {
            break;
        }
        start = end;
    }
    out
}

/// Deletes images.
///
/// Without a region every placement is removed. With a region, placements
/// intersecting each of its cells are removed.
pub fn clear_kitty(region: Option<&Region>) -> String {
    let Some(region) = region else {
        return format!("{APC_START}a=d,d=A{ST}");
    };
    let mut out = String::new();
    for row in 0..region.height {
        for col in 0..region.width {
            let _ = write!(
                out,
                "{APC_START}a=d,d=p,x={},y={}{ST}",
                u32::from(region.col) + u32::from(col) + 1,
                u32::from(region.row) + u32::from(row) + 1,
            );
        }
    }
    out
}

/// Kitty graphics backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KittyBackend {
    chunk_size: usize,
    supported: bool,
}

impl KittyBackend {
    /// Creates the backend from an environment snapshot.
    pub fn new(env: &EnvSnapshot, options: &BackendOptions) -> Self {
        Self {
            chunk_size: options.kitty_chunk_size,
            supported: env.kitty_signal().is_some(),
        }
    }

    /// Base64 bytes per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Backend for KittyBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Kitty
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
        let mut out = cursor_position(placement.row, placement.col);
        out.push_str(&encode_kitty(image, placement, self.chunk_size));
        Ok(out)
    }

    fn clear(&self, region: Option<&Region>) -> String {
        clear_kitty(region)
    }
}
