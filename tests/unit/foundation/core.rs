use super::*;

#[test]
fn elapsed_wraps_instead_of_panicking() {
    assert_eq!(elapsed_ms(1500, 1000), 500);
    assert_eq!(elapsed_ms(5, u32::MAX - 4), 10);
}

#[test]
fn fps_frame_times_are_floored() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frame_to_ms(0), 0);
    assert_eq!(fps.frame_to_ms(1), 33);
    assert_eq!(fps.frame_to_ms(30), 1000);
    assert_eq!(fps.frames_covering_ms(1000), 31);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn canvas_rejects_empty() {
    assert!(Canvas::new(0, 10).is_err());
    assert_eq!(Canvas::new(4, 3).unwrap().pixel_count(), 12);
}

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgba8::from_hex("#ff3366").unwrap(), Rgba8::opaque(255, 0x33, 0x66));
    assert_eq!(Rgba8::from_hex("fff").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::from_hex("#00000080").unwrap(),
        Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 0x80
        }
    );
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#gggggg").is_err());
}
