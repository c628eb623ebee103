use super::*;
use crate::render::backend::{BlendFunc, Filter, Wrap};

fn desc(width: u32, height: u32, format: TextureFormat) -> TextureDesc {
    TextureDesc {
        width,
        height,
        format,
        min_filter: Filter::Linear,
        mag_filter: Filter::Linear,
        wrap_s: Wrap::ClampToEdge,
        wrap_t: Wrap::ClampToEdge,
        mipmaps: false,
    }
}

fn gpu(w: u32, h: u32) -> CpuGpu {
    CpuGpu::new(Canvas::new(w, h).unwrap())
}

#[test]
fn create_and_delete_track_live_textures() {
    let mut g = gpu(2, 2);
    let a = g
        .create_texture(&desc(1, 1, TextureFormat::Rgba8), &[1, 2, 3, 4])
        .unwrap();
    let b = g
        .create_texture(&desc(1, 1, TextureFormat::Rgb8), &[1, 2, 3])
        .unwrap();
    assert_ne!(a, b);
    assert_eq!(g.live_textures(), 2);
    g.delete_texture(a);
    g.delete_texture(a);
    assert_eq!(g.live_textures(), 1);
    assert_eq!(g.stats().textures_created, 2);
    assert_eq!(g.stats().textures_deleted, 1);
}

#[test]
fn create_rejects_wrong_sizes() {
    let mut g = gpu(1, 1);
    assert!(
        g.create_texture(&desc(2, 1, TextureFormat::Rgba8), &[0; 4])
            .is_err()
    );
    assert!(
        g.create_texture(&desc(0, 1, TextureFormat::Rgba8), &[])
            .is_err()
    );
}

#[test]
fn solid_quad_blends_over_cleared_frame() {
    let mut g = gpu(2, 1);
    g.clear([0, 0, 0, 255]);
    g.set_blend(Some(BlendFunc::ALPHA));
    g.draw_fullscreen_quad(&QuadFill::Solid {
        rgb: [1.0; 3],
        alpha: 1.0,
    })
    .unwrap();
    assert_eq!(g.frame().data, vec![255; 8]);
    assert_eq!(g.stats().quads_drawn, 1);
}

#[test]
fn textured_quad_stretches_to_viewport() {
    let mut g = gpu(4, 4);
    g.clear([0, 0, 0, 255]);
    let red = [255, 0, 0, 255];
    let tex = g
        .create_texture(&desc(1, 1, TextureFormat::Rgba8), &red)
        .unwrap();
    g.set_blend(Some(BlendFunc::ALPHA));
    g.draw_fullscreen_quad(&QuadFill::Textured {
        texture: tex,
        alpha: 1.0,
    })
    .unwrap();
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(g.frame().pixel(x, y), Some(red));
        }
    }
}

#[test]
fn textured_quad_keeps_top_row_on_top() {
    // 1x2 texture: top texel white, bottom texel black; sampled at texel centers on a 1x2 target.
    let mut g = gpu(1, 2);
    let tex = g
        .create_texture(
            &desc(1, 2, TextureFormat::Rgb8),
            &[255, 255, 255, 0, 0, 0],
        )
        .unwrap();
    g.draw_fullscreen_quad(&QuadFill::Textured {
        texture: tex,
        alpha: 1.0,
    })
    .unwrap();
    assert_eq!(g.frame().pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(g.frame().pixel(0, 1), Some([0, 0, 0, 255]));
}

#[test]
fn clamp_to_edge_does_not_bleed_opposite_edge() {
    // Magnify a 2x1 texture to 8x1: left edge stays pure left texel.
    let mut g = gpu(8, 1);
    let tex = g
        .create_texture(
            &desc(2, 1, TextureFormat::Rgba8),
            &[255, 0, 0, 255, 0, 0, 255, 255],
        )
        .unwrap();
    g.draw_fullscreen_quad(&QuadFill::Textured {
        texture: tex,
        alpha: 1.0,
    })
    .unwrap();
    assert_eq!(g.frame().pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(g.frame().pixel(7, 0), Some([0, 0, 255, 255]));
}

#[test]
fn drawing_unknown_texture_errors() {
    let mut g = gpu(1, 1);
    let bogus = TextureHandle::new(99).unwrap();
    assert!(
        g.draw_fullscreen_quad(&QuadFill::Textured {
            texture: bogus,
            alpha: 1.0
        })
        .is_err()
    );
    assert_eq!(g.stats().quads_drawn, 0);
}
