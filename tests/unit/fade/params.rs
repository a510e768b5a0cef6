use super::*;

#[test]
fn thirty_fps_three_seconds_is_ninety_frames() {
    let p = FadeParams::new(
        TrailLength::new(3).unwrap(),
        FrameRate::new(30).unwrap(),
        Rgba8::BLACK,
    );
    assert_eq!(p.frames, 90);
    assert!((p.amount - 0.0597).abs() < 5e-4, "amount {}", p.amount);
    assert_eq!(p.overlay, Rgba8::rgba(0, 0, 0, 15));
}

#[test]
fn residual_after_n_frames_is_at_most_one_255th() {
    for secs in [1u32, 2, 3, 5, 10] {
        for fps in [1u32, 10, 24, 30, 60, 120, 1000] {
            let interval = 1000 / fps;
            let n = trail_frames(secs, interval);
            let f = fade_amount(n);
            let residual = (1.0 - f).powi(n as i32);
            assert!(
                residual <= 1.0 / 255.0 + 1e-12,
                "secs={secs} fps={fps} n={n} residual={residual}"
            );
            assert!(residual >= 1.0 / 255.0 - 1e-9);
            // In 0..255 units a full-intensity stamp is down to 1.
            assert!(255.0 * residual <= 1.0 + 1e-9);
        }
    }
}

#[test]
fn fade_amount_is_monotonic_in_frames() {
    let mut prev = fade_amount(1);
    assert!((prev - (1.0 - 1.0 / 255.0)).abs() < 1e-12);
    for n in 2..500 {
        let f = fade_amount(n);
        assert!(f < prev);
        assert!(f > 0.0);
        prev = f;
    }
}

#[test]
fn degenerate_inputs_clamp_to_one_frame() {
    assert_eq!(trail_frames(0, 33), 1);
    assert_eq!(trail_frames(3, 0), 1);
    assert_eq!(fade_amount(0), fade_amount(1));
}

#[test]
fn staleness_tracks_only_fade_inputs() {
    let a = TrailConfig::default();
    assert!(!FadeParams::is_stale_for(&a, &a.with_echo_color(Rgba8::rgb(1, 2, 3))));
    assert!(!FadeParams::is_stale_for(&a, &a.with_trail_color(Rgba8::rgb(1, 2, 3))));
    assert!(FadeParams::is_stale_for(&a, &a.with_background(Rgba8::rgb(1, 2, 3))));
    assert!(FadeParams::is_stale_for(
        &a,
        &a.with_trail_length(TrailLength::new(5).unwrap())
    ));
    assert!(FadeParams::is_stale_for(
        &a,
        &a.with_frame_rate(FrameRate::new(60).unwrap())
    ));
}
