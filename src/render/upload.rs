use std::borrow::Cow;

use crate::assets::decode::PixelBuffer;
use crate::foundation::error::{FlashError, FlashResult};
use crate::render::backend::{Filter, Gpu, TextureDesc, TextureFormat, TextureHandle, Wrap};

/// Texture parameters for a decoded image.
///
/// Linear filtering with clamp-to-edge on both axes and no mipmaps, so stretching the image over
/// a viewport of another aspect ratio never bleeds the opposite edge in.
pub fn texture_desc(buffer: &PixelBuffer) -> TextureDesc {
    TextureDesc {
        width: buffer.width,
        height: buffer.height,
        format: if buffer.has_alpha {
            TextureFormat::Rgba8
        } else {
            TextureFormat::Rgb8
        },
        min_filter: Filter::Linear,
        mag_filter: Filter::Linear,
        wrap_s: Wrap::ClampToEdge,
        wrap_t: Wrap::ClampToEdge,
        mipmaps: false,
    }
}

fn upload_bytes<'a>(buffer: &'a PixelBuffer, format: TextureFormat) -> Cow<'a, [u8]> {
    match format {
        TextureFormat::Rgba8 => Cow::Borrowed(&buffer.rgba8_premul),
        TextureFormat::Rgb8 => Cow::Owned(
            buffer
                .rgba8_premul
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        ),
    }
}

/// Upload `buffer` as one 2D texture. The buffer is consumed; pixels live on the GPU afterwards.
pub fn upload_texture(gpu: &mut dyn Gpu, buffer: PixelBuffer) -> FlashResult<TextureHandle> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(FlashError::gpu("refusing to upload an empty pixel buffer"));
    }
    let desc = texture_desc(&buffer);
    let bytes = upload_bytes(&buffer, desc.format);
    if bytes.len() != desc.byte_len() {
        return Err(FlashError::gpu(format!(
            "pixel buffer holds {} bytes, texture needs {}",
            bytes.len(),
            desc.byte_len()
        )));
    }
    let handle = gpu.create_texture(&desc, &bytes)?;
    tracing::debug!(
        texture = handle.get(),
        width = desc.width,
        height = desc.height,
        format = ?desc.format,
        "uploaded texture"
    );
    Ok(handle)
}

/// Delete the texture in `slot`, if any, leaving the slot empty. Safe to call repeatedly.
pub fn release_texture(gpu: &mut dyn Gpu, slot: &mut Option<TextureHandle>) {
    if let Some(handle) = slot.take() {
        gpu.delete_texture(handle);
        tracing::debug!(texture = handle.get(), "released texture");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/upload.rs"]
mod tests;
