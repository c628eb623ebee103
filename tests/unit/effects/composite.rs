use super::*;

#[test]
fn zero_alpha_source_is_noop_under_alpha_blend() {
    let dst = [10, 20, 30, 40];
    assert_eq!(blend_pixel(dst, [1.0, 1.0, 1.0, 0.0], Some(BlendFunc::ALPHA)), dst);
}

#[test]
fn opaque_white_replaces_dst() {
    let dst = [0, 64, 128, 255];
    assert_eq!(
        blend_pixel(dst, [1.0, 1.0, 1.0, 1.0], Some(BlendFunc::ALPHA)),
        [255, 255, 255, 255]
    );
}

#[test]
fn half_white_over_black_is_mid_gray() {
    let out = blend_pixel([0, 0, 0, 255], [1.0, 1.0, 1.0, 0.5], Some(BlendFunc::ALPHA));
    // rgb = 0.5 * 1 + 0 * 0.5; a = 0.5 * 0.5 + 1 * 0.5
    assert_eq!(out, [128, 128, 128, 191]);
}

#[test]
fn disabled_blend_overwrites() {
    let out = blend_pixel([9, 9, 9, 9], [0.0, 1.0, 0.0, 0.25], None);
    assert_eq!(out, [0, 255, 0, 64]);
}

#[test]
fn fragments_are_clamped() {
    let out = blend_pixel([0, 0, 0, 0], [2.0, -1.0, 0.5, 1.5], Some(BlendFunc::ALPHA));
    assert_eq!(out, [255, 0, 128, 255]);
}

#[test]
fn fill_touches_every_pixel() {
    let mut buf = vec![0u8, 0, 0, 255, 255, 0, 0, 255];
    blend_fill_in_place(&mut buf, [1.0, 1.0, 1.0, 1.0], Some(BlendFunc::ALPHA));
    assert_eq!(buf, vec![255; 8]);
}

#[test]
fn lerp_texel_endpoints() {
    let a = [0.0, 0.2, 0.4, 1.0];
    let b = [1.0, 0.2, 0.0, 0.0];
    assert_eq!(lerp_texel(a, b, 0.0), a);
    assert_eq!(lerp_texel(a, b, 1.0), b);
    assert_eq!(lerp_texel(a, b, 0.5), [0.5, 0.2, 0.2, 0.5]);
}
