use super::*;

fn durations() -> Durations {
    Durations {
        flash_ms: 500,
        image_show_ms: 2000,
        fade_ms: 500,
    }
}

fn linear_session() -> Session {
    Session::new(Ease::Linear)
}

#[test]
fn idle_poll_is_inert() {
    let mut s = linear_session();
    assert_eq!(s.poll(10_000, &durations(), true), None);
    assert_eq!(s.phase(), Phase::Idle);
}

#[test]
fn full_sequence_hits_every_boundary() {
    let d = durations();
    let mut s = linear_session();
    s.start(0);
    assert_eq!(s.phase(), Phase::Flash);
    assert_eq!(s.poll(0, &d, true), None);
    assert!(s.ramp().is_running(0));
    assert!(s.opacity(250) > s.opacity(0));

    assert_eq!(s.poll(499, &d, true), None);
    let t = s.poll(500, &d, true).unwrap();
    assert_eq!((t.from, t.to), (Phase::Flash, Phase::FadeInImage));
    assert_eq!(s.opacity(500), 0.0);
    assert!(s.ramp().is_running(500));
    assert_eq!(s.ramp().target(), 1.0);

    assert_eq!(s.poll(999, &d, true), None);
    let t = s.poll(1000, &d, true).unwrap();
    assert_eq!(t.to, Phase::ShowImage);
    assert_eq!(s.phase_start_ms(), 1000);
    assert_eq!(s.opacity(1000), 1.0);

    assert_eq!(s.poll(2999, &d, true), None);
    let t = s.poll(3000, &d, true).unwrap();
    assert_eq!(t.to, Phase::FadeOut);
    assert_eq!(s.ramp().target(), 0.0);

    assert_eq!(s.poll(3499, &d, true), None);
    let t = s.poll(3500, &d, true).unwrap();
    assert_eq!((t.from, t.to), (Phase::FadeOut, Phase::Idle));
    assert!(t.finished());
    assert_eq!(s.opacity(3500), 0.0);
    assert_eq!(d.total_ms(true), 3500);
}

#[test]
fn flash_without_image_finishes_directly() {
    let d = durations();
    let mut s = linear_session();
    s.start(100);
    assert_eq!(s.poll(599, &d, false), None);
    let t = s.poll(600, &d, false).unwrap();
    assert_eq!((t.from, t.to), (Phase::Flash, Phase::Idle));
    assert_eq!(d.total_ms(false), 500);
}

#[test]
fn one_transition_per_poll() {
    let d = Durations {
        flash_ms: 0,
        image_show_ms: 0,
        fade_ms: 0,
    };
    let mut s = linear_session();
    s.start(0);
    let mut seen = Vec::new();
    while let Some(t) = s.poll(0, &d, true) {
        seen.push(t.to);
    }
    assert_eq!(
        seen,
        vec![
            Phase::FadeInImage,
            Phase::ShowImage,
            Phase::FadeOut,
            Phase::Idle
        ]
    );
}

#[test]
fn restart_mid_sequence_goes_back_to_flash() {
    let d = durations();
    let mut s = linear_session();
    s.start(0);
    s.poll(500, &d, true);
    s.poll(1000, &d, true);
    assert_eq!(s.phase(), Phase::ShowImage);

    s.start(1200);
    assert_eq!(s.phase(), Phase::Flash);
    assert_eq!(s.phase_start_ms(), 1200);
    assert_eq!(s.poll(1699, &d, true), None);
    assert_eq!(s.poll(1700, &d, true).unwrap().to, Phase::FadeInImage);
}

#[test]
fn live_duration_edits_apply_mid_phase() {
    let mut s = linear_session();
    s.start(0);
    let mut d = durations();
    assert_eq!(s.poll(300, &d, true), None);
    d.flash_ms = 200;
    assert_eq!(s.poll(300, &d, true).unwrap().to, Phase::FadeInImage);
}

#[test]
fn elapsed_survives_clock_wrap() {
    let d = durations();
    let mut s = linear_session();
    let start = u32::MAX - 100;
    s.start(start);
    assert_eq!(s.poll(start.wrapping_add(499), &d, true), None);
    assert_eq!(
        s.poll(start.wrapping_add(500), &d, true).unwrap().to,
        Phase::FadeInImage
    );
}

#[test]
fn reset_returns_to_idle() {
    let mut s = linear_session();
    s.start(0);
    s.reset();
    assert!(s.phase().is_idle());
    assert_eq!(s.opacity(10), 0.0);
}

#[test]
fn image_phases_are_flagged() {
    assert!(!Phase::Idle.shows_image());
    assert!(!Phase::Flash.shows_image());
    assert!(Phase::FadeInImage.shows_image());
    assert!(Phase::ShowImage.shows_image());
    assert!(Phase::FadeOut.shows_image());
}
