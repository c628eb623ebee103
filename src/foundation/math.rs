/// `c * a / 255`, truncating. Used for alpha premultiplication of decoded pixels.
pub(crate) fn premul_trunc(c: u8, a: u8) -> u8 {
    ((u32::from(c) * u32::from(a)) / 255) as u8
}

/// Unit float to byte, rounded and clamped.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn u8_to_unit(v: u8) -> f32 {
    f32::from(v) / 255.0
}
