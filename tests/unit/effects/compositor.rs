use super::*;
use crate::foundation::core::Canvas;
use crate::render::backend::{
    BlendFactor, Filter, TextureDesc, TextureFormat, Wrap,
};
use crate::render::cpu::CpuGpu;

fn gray_gpu() -> CpuGpu {
    let mut g = CpuGpu::new(Canvas::new(2, 2).unwrap());
    g.clear([100, 100, 100, 255]);
    g
}

fn green_texture(g: &mut CpuGpu) -> TextureHandle {
    let desc = TextureDesc {
        width: 1,
        height: 1,
        format: TextureFormat::Rgba8,
        min_filter: Filter::Linear,
        mag_filter: Filter::Linear,
        wrap_s: Wrap::ClampToEdge,
        wrap_t: Wrap::ClampToEdge,
        mipmaps: false,
    };
    g.create_texture(&desc, &[0, 255, 0, 255]).unwrap()
}

#[test]
fn idle_touches_nothing() {
    let mut g = gray_gpu();
    let before = g.frame().clone();
    let out = FrameCompositor
        .draw(
            &mut g,
            &DrawRequest {
                phase: Phase::Idle,
                opacity: 1.0,
                texture: None,
            },
        )
        .unwrap();
    assert_eq!(out, DrawOutcome::Idle);
    assert_eq!(g.frame(), &before);
    assert_eq!(g.stats().quads_drawn, 0);
    assert_eq!(g.blend(), None);
}

#[test]
fn full_flash_paints_white_and_restores_blend() {
    let mut g = gray_gpu();
    let out = FrameCompositor
        .draw(
            &mut g,
            &DrawRequest {
                phase: Phase::Flash,
                opacity: 1.0,
                texture: None,
            },
        )
        .unwrap();
    assert_eq!(out, DrawOutcome::Drawn { mode: 0 });
    assert_eq!(g.frame().pixel(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(g.blend(), None);
}

#[test]
fn zero_opacity_flash_leaves_frame_unchanged() {
    let mut g = gray_gpu();
    let before = g.frame().clone();
    FrameCompositor
        .draw(
            &mut g,
            &DrawRequest {
                phase: Phase::Flash,
                opacity: 0.0,
                texture: None,
            },
        )
        .unwrap();
    assert_eq!(g.frame(), &before);
}

#[test]
fn image_phase_without_texture_is_skipped() {
    let mut g = gray_gpu();
    let out = FrameCompositor
        .draw(
            &mut g,
            &DrawRequest {
                phase: Phase::ShowImage,
                opacity: 1.0,
                texture: None,
            },
        )
        .unwrap();
    assert_eq!(out, DrawOutcome::SkippedNoTexture);
    assert_eq!(g.stats().quads_drawn, 0);
}

#[test]
fn image_phase_samples_texture_with_opacity() {
    let mut g = gray_gpu();
    let tex = green_texture(&mut g);
    let out = FrameCompositor
        .draw(
            &mut g,
            &DrawRequest {
                phase: Phase::FadeInImage,
                opacity: 0.5,
                texture: Some(tex),
            },
        )
        .unwrap();
    assert_eq!(out, DrawOutcome::Drawn { mode: 1 });
    // rgb = tex * 0.5 + 100/255 * 0.5, a = 0.5 * 0.5 + 1 * 0.5
    let px = g.frame().pixel(0, 0).unwrap();
    let expected = [50, 178, 50, 191];
    for (got, want) in px.iter().zip(expected) {
        assert!(got.abs_diff(want) <= 1, "{px:?} vs {expected:?}");
    }
}

#[test]
fn host_blend_state_is_preserved() {
    let mut g = gray_gpu();
    let host = BlendFunc {
        src: BlendFactor::One,
        dst: BlendFactor::Zero,
    };
    g.set_blend(Some(host));
    FrameCompositor
        .draw(
            &mut g,
            &DrawRequest {
                phase: Phase::Flash,
                opacity: 0.3,
                texture: None,
            },
        )
        .unwrap();
    assert_eq!(g.blend(), Some(host));
}

#[test]
fn fill_selection_by_phase() {
    let tex = TextureHandle::new(3).unwrap();
    let req = |phase| DrawRequest {
        phase,
        opacity: 2.0,
        texture: Some(tex),
    };
    assert_eq!(FrameCompositor::fill_for(&req(Phase::Idle)), None);
    assert_eq!(
        FrameCompositor::fill_for(&req(Phase::Flash)),
        Some(QuadFill::Solid {
            rgb: [1.0; 3],
            alpha: 1.0
        })
    );
    assert_eq!(
        FrameCompositor::fill_for(&req(Phase::FadeOut)),
        Some(QuadFill::Textured {
            texture: tex,
            alpha: 1.0
        })
    );
}
