//! Rasterizes a [`QrCode`] into an RGB bitmap and writes it as PNG.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use crate::domain::ports::Storage;
use crate::qr::{EcLevel, QrCode, Version};
use crate::utils::error::{ExportError, Result};

pub const DEFAULT_BOX_SIZE: u32 = 10;
pub const DEFAULT_BORDER: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per module side.
    pub box_size: u32,
    /// Quiet zone width in modules.
    pub border: u32,
    pub ec_level: EcLevel,
    pub min_version: Version,
    pub foreground: [u8; 3],
    pub background: [u8; 3],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            ec_level: EcLevel::Low,
            min_version: Version::MIN,
            foreground: [0, 0, 0],
            background: [255, 255, 255],
        }
    }
}

impl RenderOptions {
    /// Image side length in pixels for a symbol of `modules` per side.
    pub fn image_size(&self, modules: usize) -> u32 {
        (modules as u32 + 2 * self.border) * self.box_size
    }
}

pub fn rasterize(code: &QrCode, options: &RenderOptions) -> RgbImage {
    let side = options.image_size(code.size());
    let box_size = options.box_size;
    let border = options.border;
    let foreground = Rgb(options.foreground);

    let mut img = RgbImage::from_pixel(side, side, Rgb(options.background));
    for y in 0..code.size() {
        for x in 0..code.size() {
            if !code.is_dark(x, y) {
                continue;
            }
            let px = (x as u32 + border) * box_size;
            let py = (y as u32 + border) * box_size;
            for dy in 0..box_size {
                for dx in 0..box_size {
                    img.put_pixel(px + dx, py + dy, foreground);
                }
            }
        }
    }
    img
}

pub fn to_png(code: &QrCode, options: &RenderOptions) -> Result<Vec<u8>> {
    let img = rasterize(code, options);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Encodes the PNG and writes it to `path` through `storage`. With
/// [`LocalStorage`](crate::config::LocalStorage) missing parent directories
/// are created.
pub async fn save_png<S: Storage>(
    storage: &S,
    code: &QrCode,
    options: &RenderOptions,
    path: &str,
) -> Result<()> {
    let png = to_png(code, options)?;
    storage.write_file(path, &png).await
}

/// Parses `black`, `white` or a `#rrggbb` hex colour.
pub fn parse_color(value: &str) -> Result<[u8; 3]> {
    let invalid = |reason: &str| ExportError::InvalidConfigValueError {
        field: "color".to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "black" => Ok([0, 0, 0]),
        "white" => Ok([255, 255, 255]),
        hex => {
            let digits = hex
                .strip_prefix('#')
                .ok_or_else(|| invalid("expected black, white or #rrggbb"))?;
            if digits.len() != 6 || !digits.is_ascii() {
                return Err(invalid("expected six hex digits"));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid("invalid hex digit"))
            };
            Ok([channel(0)?, channel(2)?, channel(4)?])
        }
    }
}
