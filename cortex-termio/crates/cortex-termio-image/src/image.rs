//! Pixel buffers, placement and screen regions.

use crate::error::{ImageError, Result};
use std::borrow::Cow;
use std::fmt;
use std::fmt::Write as _;

/// Alpha at or above which a pixel counts as opaque.
pub const OPAQUE_THRESHOLD: u8 = 128;

/// An RGBA8 image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// RGBA8 buffer size for the given dimensions, `None` on overflow.
fn byte_len(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(4)
}

impl Image {
    /// Wraps an RGBA8 buffer of exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyImage);
        }
        if byte_len(width, height) != Some(pixels.len()) {
            return Err(ImageError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    ///
    /// Dimensions are validated before `f` is called.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyImage);
        }
        let len = byte_len(width, height).ok_or(ImageError::InvalidDimensions {
            width,
            height,
            len: 0,
        })?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at (x, y).
    ///
    /// Out-of-bounds coordinates read as fully transparent.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Scales down with nearest-neighbour sampling so the image fits within
    /// the given bounds, preserving aspect ratio. `None` or `0` is unbounded.
    ///
    /// Images that already fit are returned borrowed; images are never enlarged.
    pub fn fit_within(&self, max_width: Option<u32>, max_height: Option<u32>) -> Cow<'_, Image> {
        let max_width = max_width.filter(|&m| m > 0).unwrap_or(u32::MAX);
        let max_height = max_height.filter(|&m| m > 0).unwrap_or(u32::MAX);
        if self.width <= max_width && self.height <= max_height {
            return Cow::Borrowed(self);
        }

        let scale = (f64::from(max_width) / f64::from(self.width))
            .min(f64::from(max_height) / f64::from(self.height));
        let width = ((f64::from(self.width) * scale).floor() as u32).clamp(1, max_width);
        let height = ((f64::from(self.height) * scale).floor() as u32).clamp(1, max_height);
        Cow::Owned(self.resize_nearest(width, height))
    }

    fn resize_nearest(&self, width: u32, height: u32) -> Image {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            let src_y = (u64::from(y) * u64::from(self.height) / u64::from(height)) as u32;
            for x in 0..width {
                let src_x = (u64::from(x) * u64::from(self.width) / u64::from(width)) as u32;
                pixels.extend_from_slice(&self.pixel(src_x, src_y));
            }
        }
        Image {
            width,
            height,
            pixels,
        }
    }
}

/// Returns true if an RGBA pixel should be painted.
pub fn is_opaque(pixel: [u8; 4]) -> bool {
    pixel[3] >= OPAQUE_THRESHOLD
}

// ============================================================================
// Placement
// ============================================================================

/// A display size along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    /// Terminal cells.
    Cells(u32),
    /// Pixels.
    Pixels(u32),
    /// Percentage of the terminal.
    Percent(u32),
    /// Natural size.
    #[default]
    Auto,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Cells(n) => write!(f, "{n}"),
            Dimension::Pixels(n) => write!(f, "{n}px"),
            Dimension::Percent(n) => write!(f, "{n}%"),
            Dimension::Auto => write!(f, "auto"),
        }
    }
}

/// Where and how large to draw an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Top row, 0-indexed.
    pub row: u16,
    /// Left column, 0-indexed.
    pub col: u16,
    /// Display width.
    pub width: Dimension,
    /// Display height.
    pub height: Dimension,
    /// Keep the aspect ratio when both dimensions are given.
    pub preserve_aspect_ratio: bool,
    /// File name reported to the terminal.
    pub name: Option<String>,
    /// Image id for protocols that track images.
    pub id: Option<u32>,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            row: 0,
            col: 0,
            width: Dimension::Auto,
            height: Dimension::Auto,
            preserve_aspect_ratio: true,
            name: None,
            id: None,
        }
    }
}

impl Placement {
    /// Placement at a cell with natural size.
    pub fn at(row: u16, col: u16) -> Self {
        Self {
            row,
            col,
            ..Self::default()
        }
    }

    /// Sets the display size.
    #[must_use]
    pub fn with_size(mut self, width: Dimension, height: Dimension) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// A rectangle of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    /// Top row, 0-indexed.
    pub row: u16,
    /// Left column, 0-indexed.
    pub col: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Region {
    /// Creates a region.
    pub fn new(row: u16, col: u16, width: u16, height: u16) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }
}

/// CUP sequence moving the cursor to a 0-indexed cell.
pub fn cursor_position(row: u16, col: u16) -> String {
    format!("\x1b[{};{}H", u32::from(row) + 1, u32::from(col) + 1)
}

/// Overwrites a region with spaces, one cursor move per row.
pub fn blank_region(region: &Region) -> String {
    let fill = " ".repeat(region.width as usize);
    let mut out = String::new();
    for offset in 0..region.height {
        out.push_str(&cursor_position(region.row.saturating_add(offset), region.col));
        out.push_str(&fill);
    }
    out
}

pub(crate) fn push_cursor(out: &mut String, row: u32, col: u16) {
    let _ = write!(out, "\x1b[{};{}H", row + 1, u32::from(col) + 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> Image {
        Image::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                [255, 255, 255, 255]
            } else {
                [0, 0, 0, 255]
            }
        })
        .unwrap()
    }

    mod image_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_validation() {
            assert_eq!(Image::new(0, 1, vec![]), Err(ImageError::EmptyImage));
            assert_eq!(
                Image::new(2, 2, vec![0; 15]),
                Err(ImageError::InvalidDimensions {
                    width: 2,
                    height: 2,
                    len: 15,
                })
            );
            assert!(Image::new(2, 2, vec![0; 16]).is_ok());
        }

        #[test]
        fn test_from_fn_rejects_overflowing_size() {
            assert_eq!(
                Image::from_fn(u32::MAX, u32::MAX, |_, _| unreachable!()),
                Err(ImageError::InvalidDimensions {
                    width: u32::MAX,
                    height: u32::MAX,
                    len: 0,
                })
            );
            assert_eq!(
                Image::from_fn(0, 5, |_, _| unreachable!()),
                Err(ImageError::EmptyImage)
            );
        }

        #[test]
        fn test_pixel_access() {
            let image = checker(3, 2);
            assert_eq!(image.pixel(0, 0), [255, 255, 255, 255]);
            assert_eq!(image.pixel(1, 0), [0, 0, 0, 255]);
            assert_eq!(image.pixel(3, 0), [0, 0, 0, 0]);
        }

        #[test]
        fn test_fit_within_keeps_small_images() {
            let image = checker(4, 4);
            assert!(matches!(image.fit_within(Some(10), None), Cow::Borrowed(_)));
            assert!(matches!(image.fit_within(Some(0), Some(0)), Cow::Borrowed(_)));
        }

        #[test]
        fn test_fit_within_preserves_aspect() {
            let image = checker(100, 50);
            let fitted = image.fit_within(Some(20), Some(40));
            assert_eq!((fitted.width(), fitted.height()), (20, 10));

            let fitted = image.fit_within(None, Some(5));
            assert_eq!((fitted.width(), fitted.height()), (10, 5));
        }

        #[test]
        fn test_fit_within_never_collapses() {
            let image = checker(1000, 1);
            let fitted = image.fit_within(Some(10), Some(10));
            assert_eq!((fitted.width(), fitted.height()), (10, 1));
        }
    }

    mod placement_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_dimension_display() {
            assert_eq!(Dimension::Cells(10).to_string(), "10");
            assert_eq!(Dimension::Pixels(200).to_string(), "200px");
            assert_eq!(Dimension::Percent(50).to_string(), "50%");
            assert_eq!(Dimension::Auto.to_string(), "auto");
        }

        #[test]
        fn test_cursor_position_is_one_indexed() {
            assert_eq!(cursor_position(0, 0), "\x1b[1;1H");
            assert_eq!(cursor_position(4, 9), "\x1b[5;10H");
            assert_eq!(cursor_position(u16::MAX, 0), "\x1b[65536;1H");
        }

        #[test]
        fn test_blank_region() {
            let out = blank_region(&Region::new(1, 2, 3, 2));
            assert_eq!(out, "\x1b[2;3H   \x1b[3;3H   ");
            assert_eq!(blank_region(&Region::new(0, 0, 5, 0)), "");
        }
    }
}
