use crate::animation::sequence::Phase;
use crate::foundation::error::FlashResult;
use crate::render::backend::{BlendFunc, Gpu, QuadFill, TextureHandle};

/// Inputs for one composited frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRequest {
    pub phase: Phase,
    pub opacity: f32,
    pub texture: Option<TextureHandle>,
}

/// What a [`FrameCompositor::draw`] call ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Idle phase, nothing touched.
    Idle,
    /// Image phase without a texture; the draw was skipped.
    SkippedNoTexture,
    /// A quad was drawn with this shader mode.
    Drawn { mode: i32 },
}

/// Per-frame renderer for the flash and image overlays.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameCompositor;

impl FrameCompositor {
    /// Quad fill for `request`, or `None` when nothing should be drawn.
    pub fn fill_for(request: &DrawRequest) -> Option<QuadFill> {
        let alpha = request.opacity.clamp(0.0, 1.0);
        match request.phase {
            Phase::Idle => None,
            Phase::Flash => Some(QuadFill::Solid {
                rgb: [1.0, 1.0, 1.0],
                alpha,
            }),
            Phase::FadeInImage | Phase::ShowImage | Phase::FadeOut => request
                .texture
                .map(|texture| QuadFill::Textured { texture, alpha }),
        }
    }

    /// Draw one full-viewport quad over the bound target with standard alpha blending.
    ///
    /// The blend state found on entry is restored before returning, including on error.
    pub fn draw(&self, gpu: &mut dyn Gpu, request: &DrawRequest) -> FlashResult<DrawOutcome> {
        if request.phase.is_idle() {
            return Ok(DrawOutcome::Idle);
        }
        let Some(fill) = Self::fill_for(request) else {
            return Ok(DrawOutcome::SkippedNoTexture);
        };

        let saved = gpu.blend();
        gpu.set_blend(Some(BlendFunc::ALPHA));
        let res = gpu.draw_fullscreen_quad(&fill);
        gpu.set_blend(saved);
        res?;

        Ok(DrawOutcome::Drawn { mode: fill.mode() })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/compositor.rs"]
mod tests;
