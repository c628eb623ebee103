use crate::foundation::math::{u8_to_unit, unit_to_u8};
use crate::render::backend::{BlendFactor, BlendFunc};

/// Unit-range RGBA fragment produced by a quad fill.
pub type Fragment = [f32; 4];

fn factor(f: BlendFactor, src_alpha: f32) -> f32 {
    match f {
        BlendFactor::Zero => 0.0,
        BlendFactor::One => 1.0,
        BlendFactor::SrcAlpha => src_alpha,
        BlendFactor::OneMinusSrcAlpha => 1.0 - src_alpha,
    }
}

/// Apply fixed-function blending of `src` onto `dst`, all four channels alike.
///
/// With blending disabled the fragment replaces the destination.
pub fn blend_pixel(dst: [u8; 4], src: Fragment, blend: Option<BlendFunc>) -> [u8; 4] {
    let src = src.map(|c| c.clamp(0.0, 1.0));
    let Some(func) = blend else {
        return src.map(unit_to_u8);
    };

    let sa = src[3];
    let sf = factor(func.src, sa);
    let df = factor(func.dst, sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = unit_to_u8(src[i] * sf + u8_to_unit(dst[i]) * df);
    }
    out
}

/// Blend `src` over every pixel of an RGBA8 buffer.
pub fn blend_fill_in_place(dst: &mut [u8], src: Fragment, blend: Option<BlendFunc>) {
    for px in dst.chunks_exact_mut(4) {
        let out = blend_pixel([px[0], px[1], px[2], px[3]], src, blend);
        px.copy_from_slice(&out);
    }
}

/// Linear interpolation between two texels, per channel.
pub fn lerp_texel(a: Fragment, b: Fragment, t: f32) -> Fragment {
    let mut out = [0.0f32; 4];
    for i in 0..4 {
        out[i] = a[i] + (b[i] - a[i]) * t;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
