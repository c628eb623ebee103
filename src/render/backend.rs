use std::num::NonZeroU32;

use crate::foundation::core::Canvas;
use crate::foundation::error::FlashResult;

/// A rendered frame as RGBA8 pixels, tightly packed, row-major, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// A frame filled with one color.
    pub fn filled(canvas: Canvas, rgba: [u8; 4]) -> Self {
        let data = rgba.repeat(canvas.pixel_count());
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Opaque GPU texture name. Zero is never a valid handle; absence is `Option::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(NonZeroU32);

impl TextureHandle {
    /// Wrap a raw texture name, rejecting zero.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Texel storage format of an uploaded texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    Rgba8,
    Rgb8,
}

impl TextureFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 => 4,
            Self::Rgb8 => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wrap {
    ClampToEdge,
    Repeat,
}

/// Everything needed to create a 2D texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
    pub mipmaps: bool,
}

impl TextureDesc {
    /// Expected upload size in bytes.
    pub fn byte_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * self.format.bytes_per_pixel()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Fixed-function blend equation `src * src_factor + dst * dst_factor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlendFunc {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendFunc {
    /// `SrcAlpha, OneMinusSrcAlpha`.
    pub const ALPHA: Self = Self {
        src: BlendFactor::SrcAlpha,
        dst: BlendFactor::OneMinusSrcAlpha,
    };
}

/// Fragment source for a full-viewport quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuadFill {
    /// Constant color `(rgb, alpha)`.
    Solid { rgb: [f32; 3], alpha: f32 },
    /// `(tex.rgb, tex.a * alpha)` sampled across the whole viewport.
    Textured { texture: TextureHandle, alpha: f32 },
}

impl QuadFill {
    /// Shader mode selector: 0 for solid, 1 for textured.
    pub fn mode(&self) -> i32 {
        match self {
            Self::Solid { .. } => 0,
            Self::Textured { .. } => 1,
        }
    }
}

/// Graphics calls the effect needs. Only valid inside a host graphics scope.
///
/// The render target is whatever the host bound before handing out the `Gpu` (the output frame
/// buffer during post hooks).
pub trait Gpu {
    /// Create a 2D texture and upload `data` (exactly `desc.byte_len()` bytes) in one transfer.
    fn create_texture(&mut self, desc: &TextureDesc, data: &[u8]) -> FlashResult<TextureHandle>;

    /// Delete a texture. Unknown handles are ignored.
    fn delete_texture(&mut self, handle: TextureHandle);

    /// Current blend state; `None` means blending disabled.
    fn blend(&self) -> Option<BlendFunc>;

    fn set_blend(&mut self, blend: Option<BlendFunc>);

    /// Draw one quad covering the viewport.
    fn draw_fullscreen_quad(&mut self, fill: &QuadFill) -> FlashResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
