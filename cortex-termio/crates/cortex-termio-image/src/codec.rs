//! Payload codecs shared by the image protocols.

use crate::error::{ImageError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Standard RFC 4648 base64 with padding.
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Encodes an RGBA8 buffer as PNG.
///
/// `pixels` must hold exactly `width * height * 4` bytes.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(png)
}
