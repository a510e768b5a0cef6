use super::*;
use crate::fade::FadeParams;
use serde_json::json;

#[test]
fn defaults_match_the_demo() {
    let cfg = TrailConfig::default();
    assert_eq!(cfg.frame_rate.fps(), 30);
    assert_eq!(cfg.frame_rate.interval_ms(), 33);
    assert_eq!(cfg.trail_length.secs(), 3);
    assert_eq!(cfg.background, Rgba8::BLACK);
    assert_eq!(cfg.trail_color, Rgba8::rgb(0x63, 0xB5, 0xB5));
    assert_eq!(cfg.echo_color, Rgba8::rgb(0xFC, 0xEE, 0x03));
    assert_eq!(cfg.fade, FadeMethod::ColorMatrix);
    assert_eq!(cfg.motion, MotionKind::RandomWalk);
    cfg.validate().unwrap();
}

#[test]
fn trail_frames_uses_whole_millisecond_interval() {
    let cfg = TrailConfig::default();
    assert_eq!(cfg.trail_frames(), 90);

    let cfg = cfg
        .with_frame_rate(FrameRate::new(60).unwrap())
        .with_trail_length(TrailLength::new(1).unwrap());
    // 1000 / 16
    assert_eq!(cfg.trail_frames(), 62);

    let cfg = cfg.with_frame_rate(FrameRate::new(10).unwrap());
    assert_eq!(cfg.trail_frames(), 10);
}

#[test]
fn frame_rate_and_trail_length_reject_zero() {
    assert!(FrameRate::new(0).is_err());
    assert!(FrameRate::new(1001).is_err());
    assert!(TrailLength::new(0).is_err());
    for fps in FrameRate::CHOICES {
        assert!(FrameRate::new(fps).unwrap().interval_ms() > 0);
    }
    for secs in TrailLength::CHOICES {
        TrailLength::new(secs).unwrap();
    }
}

#[test]
fn parses_hex_and_palette_colors() {
    assert_eq!(parse_color("#ff0000").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(parse_color("0000ff80").unwrap(), Rgba8::rgba(0, 0, 255, 0x80));
    assert_eq!(parse_color("Teal").unwrap(), Palette::Teal.color());
    assert_eq!(parse_color(" grey ").unwrap(), Palette::Gray.color());
    assert!(parse_color("#12345").is_err());
    assert!(parse_color("#zz0000").is_err());
    assert!(parse_color("not-a-color").is_err());
}

#[test]
fn deserializes_json_with_defaults() {
    let v = json!({
        "frame_rate": 60,
        "trail_length": 5,
        "background": "#202020",
        "echo_color": "red",
        "fade": "alpha-overlay",
        "motion": "ship-drift",
        "seed": 7
    });
    let cfg = TrailConfig::from_json(&v.to_string()).unwrap();
    assert_eq!(cfg.frame_rate.fps(), 60);
    assert_eq!(cfg.trail_length.secs(), 5);
    assert_eq!(cfg.background, Rgba8::rgb(0x20, 0x20, 0x20));
    assert_eq!(cfg.echo_color, Palette::Red.color());
    assert_eq!(cfg.trail_color, Palette::Teal.color());
    assert_eq!(cfg.fade, FadeMethod::AlphaOverlay);
    assert_eq!(cfg.motion, MotionKind::ShipDrift);
    assert_eq!(cfg.seed, Some(7));
}

#[test]
fn json_rejects_invalid_values() {
    assert!(TrailConfig::from_json(&json!({ "frame_rate": 0 }).to_string()).is_err());
    assert!(TrailConfig::from_json(&json!({ "trail_length": 0 }).to_string()).is_err());
    assert!(TrailConfig::from_json(&json!({ "fps": 30 }).to_string()).is_err());
    assert!(TrailConfig::from_json(&json!({ "outline": "M 0 0 X" }).to_string()).is_err());
}

#[test]
fn config_round_trips_through_json() {
    let cfg = TrailConfig::default().with_background(Palette::White.color());
    let s = serde_json::to_string(&cfg).unwrap();
    assert!(s.contains("\"#FFFFFFFF\""));
    assert_eq!(TrailConfig::from_json(&s).unwrap(), cfg);
}

#[test]
fn builders_leave_the_original_snapshot_untouched() {
    let a = TrailConfig::default();
    let b = a.with_echo_color(Palette::Blue.color());
    assert_eq!(a.echo_color, Palette::Yellow.color());
    assert_eq!(b.echo_color, Palette::Blue.color());
    assert_eq!(a.trail_color, b.trail_color);
}

#[test]
fn outline_follows_motion_unless_overridden() {
    let circle = TrailConfig::default().outline_path().unwrap();
    let ship = TrailConfig::default()
        .with_motion(MotionKind::ShipDrift)
        .outline_path()
        .unwrap();
    assert_ne!(circle, ship);

    let custom = TrailConfig {
        outline: Some("M -5 -5 L 5 -5 L 5 5 L -5 5 Z".to_string()),
        ..TrailConfig::default()
    };
    let p = custom.outline_path().unwrap();
    assert_eq!(p.elements().len(), 5);
}

#[test]
fn trail_frames_agrees_with_fade_params() {
    for fps in FrameRate::CHOICES {
        for secs in TrailLength::CHOICES {
            let cfg = TrailConfig::default()
                .with_frame_rate(FrameRate::new(fps).unwrap())
                .with_trail_length(TrailLength::new(secs).unwrap());
            assert_eq!(cfg.trail_frames(), FadeParams::from_config(&cfg).frames);
            assert_eq!(
                cfg.trail_frames(),
                crate::fade::trail_frames(secs, cfg.frame_rate.interval_ms())
            );
        }
    }
}
