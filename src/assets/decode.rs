use std::path::{Path, PathBuf};

use crate::foundation::math::premul_trunc;

/// Pixel layout tag for decoded buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 4 bytes per pixel, R,G,B,A order, colors premultiplied by alpha.
    Rgba8Premul,
}

/// Decoded image ready for upload.
///
/// Rows are tightly packed (`width * 4` bytes) in RGBA order with premultiplied alpha, whatever
/// layout the source container used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Whether the source carried an alpha channel. RGB-only sources decode with alpha 255.
    pub has_alpha: bool,
    pub rgba8_premul: Vec<u8>,
}

impl PixelBuffer {
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Pixel at `(x, y)` as `[r, g, b, a]`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("read image '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decode png: {0}")]
    Image(#[from] image::ImageError),

    #[error("image has zero dimension ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("pixel data too short: expected {expected} bytes, got {actual}")]
    ShortBuffer { expected: usize, actual: usize },
}

/// How source bytes are laid out, one row at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceLayout {
    /// Straight-alpha bytes R,G,B,A.
    Rgba8,
    /// Bytes R,G,B; alpha is implied opaque.
    Rgb8,
    /// One little-endian `u32` per pixel holding `a << 24 | r << 16 | g << 8 | b`.
    Argb32Le,
}

impl SourceLayout {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 | Self::Argb32Le => 4,
            Self::Rgb8 => 3,
        }
    }

    fn has_alpha(self) -> bool {
        !matches!(self, Self::Rgb8)
    }

    /// Unpack one pixel to `(r, g, b, a)`.
    fn unpack(self, px: &[u8]) -> (u8, u8, u8, u8) {
        match self {
            Self::Rgba8 => (px[0], px[1], px[2], px[3]),
            Self::Rgb8 => (px[0], px[1], px[2], 255),
            Self::Argb32Le => {
                let v = u32::from_le_bytes([px[0], px[1], px[2], px[3]]);
                let b = (v & 0xff) as u8;
                let g = ((v >> 8) & 0xff) as u8;
                let r = ((v >> 16) & 0xff) as u8;
                let a = ((v >> 24) & 0xff) as u8;
                (r, g, b, a)
            }
        }
    }
}

/// Read and decode the PNG at `path`.
///
/// An empty path (no home directory) surfaces as [`DecodeError::Io`].
#[tracing::instrument(level = "debug")]
pub fn decode_png(path: &Path) -> Result<PixelBuffer, DecodeError> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_png_bytes(&bytes)
}

/// Decode PNG bytes into a premultiplied RGBA8 buffer.
#[tracing::instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn decode_png_bytes(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let dyn_img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
    let (width, height) = (dyn_img.width(), dyn_img.height());

    if dyn_img.color().has_alpha() {
        let rgba = dyn_img.to_rgba8();
        let stride = width as usize * SourceLayout::Rgba8.bytes_per_pixel();
        convert_rows(rgba.as_raw(), width, height, stride, SourceLayout::Rgba8)
    } else {
        let rgb = dyn_img.to_rgb8();
        let stride = width as usize * SourceLayout::Rgb8.bytes_per_pixel();
        convert_rows(rgb.as_raw(), width, height, stride, SourceLayout::Rgb8)
    }
}

/// Convert a packed little-endian ARGB32 surface whose rows are `stride` bytes apart.
pub fn convert_packed_argb32(
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
) -> Result<PixelBuffer, DecodeError> {
    convert_rows(data, width, height, stride, SourceLayout::Argb32Le)
}

/// Walk `height` rows of `layout` pixels `stride` bytes apart, premultiply and repack to RGBA.
///
/// Alpha strictly between 0 and 255 scales color channels by `a / 255`, truncating. Opaque pixels
/// are copied. Fully transparent pixels come out as all zeros.
pub fn convert_rows(
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    layout: SourceLayout,
) -> Result<PixelBuffer, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::ZeroDimension { width, height });
    }

    let bpp = layout.bytes_per_pixel();
    let row_bytes = width as usize * bpp;
    if stride < row_bytes {
        return Err(DecodeError::ShortBuffer {
            expected: row_bytes,
            actual: stride,
        });
    }
    // The last row only needs `row_bytes`, not a full stride.
    let expected = stride * (height as usize - 1) + row_bytes;
    if data.len() < expected {
        return Err(DecodeError::ShortBuffer {
            expected,
            actual: data.len(),
        });
    }

    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height as usize {
        let row = &data[y * stride..y * stride + row_bytes];
        for px in row.chunks_exact(bpp) {
            let (r, g, b, a) = layout.unpack(px);
            out.extend_from_slice(&premultiply(r, g, b, a));
        }
    }

    Ok(PixelBuffer {
        width,
        height,
        format: PixelFormat::Rgba8Premul,
        has_alpha: layout.has_alpha(),
        rgba8_premul: out,
    })
}

fn premultiply(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    match a {
        255 => [r, g, b, a],
        0 => [0, 0, 0, 0],
        _ => [
            premul_trunc(r, a),
            premul_trunc(g, a),
            premul_trunc(b, a),
            a,
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
