use std::collections::HashMap;

use crate::effects::composite::{Fragment, blend_fill_in_place, blend_pixel, lerp_texel};
use crate::foundation::core::Canvas;
use crate::foundation::error::{FlashError, FlashResult};
use crate::foundation::math::u8_to_unit;
use crate::render::backend::{
    BlendFunc, Filter, FrameRGBA, Gpu, QuadFill, TextureDesc, TextureFormat, TextureHandle, Wrap,
};

/// Resource counters, for leak checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuGpuStats {
    pub textures_created: u64,
    pub textures_deleted: u64,
    pub quads_drawn: u64,
}

struct CpuTexture {
    desc: TextureDesc,
    // Always expanded to RGBA8 regardless of upload format.
    rgba: Vec<u8>,
}

impl CpuTexture {
    fn texel(&self, x: i64, y: i64) -> Fragment {
        let x = wrap_coord(x, self.desc.width, self.desc.wrap_s);
        let y = wrap_coord(y, self.desc.height, self.desc.wrap_t);
        let idx = (y * self.desc.width as usize + x) * 4;
        let px = &self.rgba[idx..idx + 4];
        [
            u8_to_unit(px[0]),
            u8_to_unit(px[1]),
            u8_to_unit(px[2]),
            u8_to_unit(px[3]),
        ]
    }

    /// Sample at normalized `(u, v)` with texel centers at `(i + 0.5) / size`.
    fn sample(&self, u: f32, v: f32, filter: Filter) -> Fragment {
        let (w, h) = (self.desc.width as f32, self.desc.height as f32);
        match filter {
            Filter::Nearest => self.texel((u * w).floor() as i64, (v * h).floor() as i64),
            Filter::Linear => {
                let tx = u * w - 0.5;
                let ty = v * h - 0.5;
                let (x0, y0) = (tx.floor(), ty.floor());
                let (fx, fy) = (tx - x0, ty - y0);
                let (x0, y0) = (x0 as i64, y0 as i64);
                let top = lerp_texel(self.texel(x0, y0), self.texel(x0 + 1, y0), fx);
                let bottom = lerp_texel(self.texel(x0, y0 + 1), self.texel(x0 + 1, y0 + 1), fx);
                lerp_texel(top, bottom, fy)
            }
        }
    }
}

fn wrap_coord(c: i64, size: u32, wrap: Wrap) -> usize {
    let size = i64::from(size);
    match wrap {
        Wrap::ClampToEdge => c.clamp(0, size - 1) as usize,
        Wrap::Repeat => c.rem_euclid(size) as usize,
    }
}

/// Software [`Gpu`] rasterizing into an RGBA8 frame buffer.
///
/// Mirrors the fixed-function pipeline the effect relies on: full-viewport quads, one sampler
/// with the texture's own filter and wrap modes, and `src * sf + dst * df` blending.
pub struct CpuGpu {
    frame: FrameRGBA,
    textures: HashMap<TextureHandle, CpuTexture>,
    next_name: u32,
    blend: Option<BlendFunc>,
    stats: CpuGpuStats,
}

impl CpuGpu {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            frame: FrameRGBA::filled(canvas, [0, 0, 0, 0]),
            textures: HashMap::new(),
            next_name: 1,
            blend: None,
            stats: CpuGpuStats::default(),
        }
    }

    /// Reset the frame buffer to `rgba`, the way a host paints its scene before post hooks.
    pub fn clear(&mut self, rgba: [u8; 4]) {
        for px in self.frame.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn stats(&self) -> CpuGpuStats {
        self.stats
    }

    fn shade(&self, fill: &QuadFill, tex: Option<&CpuTexture>, x: u32, y: u32) -> Fragment {
        match (fill, tex) {
            (QuadFill::Solid { rgb, alpha }, _) => [rgb[0], rgb[1], rgb[2], *alpha],
            (QuadFill::Textured { alpha, .. }, Some(tex)) => {
                let u = (x as f32 + 0.5) / self.frame.width as f32;
                let v = (y as f32 + 0.5) / self.frame.height as f32;
                // Minification vs magnification picks the filter.
                let minify =
                    tex.desc.width > self.frame.width || tex.desc.height > self.frame.height;
                let filter = if minify {
                    tex.desc.min_filter
                } else {
                    tex.desc.mag_filter
                };
                let t = tex.sample(u, v, filter);
                [t[0], t[1], t[2], t[3] * alpha]
            }
            (QuadFill::Textured { .. }, None) => [0.0; 4],
        }
    }
}

impl Gpu for CpuGpu {
    fn create_texture(&mut self, desc: &TextureDesc, data: &[u8]) -> FlashResult<TextureHandle> {
        if desc.width == 0 || desc.height == 0 {
            return Err(FlashError::gpu("texture dimensions must be non-zero"));
        }
        if data.len() != desc.byte_len() {
            return Err(FlashError::gpu(format!(
                "texture upload expects {} bytes, got {}",
                desc.byte_len(),
                data.len()
            )));
        }
        let rgba = match desc.format {
            TextureFormat::Rgba8 => data.to_vec(),
            TextureFormat::Rgb8 => data
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
        };
        let handle = TextureHandle::new(self.next_name)
            .ok_or_else(|| FlashError::gpu("texture names exhausted"))?;
        self.next_name = self.next_name.wrapping_add(1);
        self.textures.insert(handle, CpuTexture { desc: *desc, rgba });
        self.stats.textures_created += 1;
        Ok(handle)
    }

    fn delete_texture(&mut self, handle: TextureHandle) {
        if self.textures.remove(&handle).is_some() {
            self.stats.textures_deleted += 1;
        }
    }

    fn blend(&self) -> Option<BlendFunc> {
        self.blend
    }

    fn set_blend(&mut self, blend: Option<BlendFunc>) {
        self.blend = blend;
    }

    fn draw_fullscreen_quad(&mut self, fill: &QuadFill) -> FlashResult<()> {
        let tex = match fill {
            QuadFill::Textured { texture, .. } => Some(self.textures.get(texture).ok_or_else(
                || FlashError::gpu(format!("draw with unknown texture {}", texture.get())),
            )?),
            QuadFill::Solid { .. } => None,
        };

        if let QuadFill::Solid { rgb, alpha } = fill {
            let src = [rgb[0], rgb[1], rgb[2], *alpha];
            blend_fill_in_place(&mut self.frame.data, src, self.blend);
        } else {
            let (w, h) = (self.frame.width, self.frame.height);
            let mut out = Vec::with_capacity(self.frame.data.len());
            for y in 0..h {
                for x in 0..w {
                    let src = self.shade(fill, tex, x, y);
                    let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
                    let d = &self.frame.data[idx..idx + 4];
                    out.extend_from_slice(&blend_pixel([d[0], d[1], d[2], d[3]], src, self.blend));
                }
            }
            self.frame.data = out;
        }

        self.stats.quads_drawn += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
