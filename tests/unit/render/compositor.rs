use super::*;
use crate::config::{FrameRate, TrailLength};
use crate::fade::FadeMethod;
use crate::foundation::core::Point;
use crate::render::surface::FrameSurface;

fn config() -> Arc<TrailConfig> {
    Arc::new(TrailConfig {
        outline: Some("M -3 -3 L 3 -3 L 3 3 L -3 3 Z".to_string()),
        ..TrailConfig::default()
    })
}

fn surface(w: f64, h: f64) -> FrameSurface {
    FrameSurface::new(LogicalSize::new(w, h), 1.0).unwrap()
}

fn at(x: f64, y: f64) -> ObjectState {
    ObjectState::at(Point::new(x, y))
}

#[test]
fn composite_before_layout_is_a_silent_skip() {
    let mut c = TrailCompositor::new(config()).unwrap();
    let mut s = surface(32.0, 32.0);
    assert!(!c.composite(&at(8.0, 8.0), &mut s).unwrap());
    assert_eq!(s.layers_drawn(), 0);
}

#[test]
fn resize_allocates_exact_size_cleared_to_background() {
    let cfg = Arc::new(config().with_background(Rgba8::rgb(10, 20, 30)));
    let mut c = TrailCompositor::new(cfg).unwrap();

    let out = c.resize(LogicalSize::new(40.0, 30.0), 1.5).unwrap();
    assert_eq!(out, ResizeOutcome::Reallocated(PhysicalSize::new(60, 45)));
    for layer in [Layer::Trail, Layer::Echo] {
        let b = c.buffer(layer).unwrap();
        assert_eq!(b.size(), PhysicalSize::new(60, 45));
        assert!(b.data().chunks_exact(4).all(|p| p == [10, 20, 30, 255]));
    }

    assert_eq!(
        c.resize(LogicalSize::new(40.0, 30.0), 1.5).unwrap(),
        ResizeOutcome::Unchanged
    );
    assert_eq!(
        c.resize(LogicalSize::new(41.0, 30.0), 1.5).unwrap(),
        ResizeOutcome::Reallocated(PhysicalSize::new(62, 45))
    );
    assert_eq!(c.buffer(Layer::Echo).unwrap().size(), PhysicalSize::new(62, 45));
}

#[test]
fn resize_clears_history() {
    let mut c = TrailCompositor::new(config()).unwrap();
    let mut s = surface(32.0, 32.0);
    c.resize(LogicalSize::new(32.0, 32.0), 1.0).unwrap();
    c.composite(&at(16.0, 16.0), &mut s).unwrap();
    assert_ne!(c.buffer(Layer::Trail).unwrap().pixel(16, 16), Some([0, 0, 0, 255]));

    c.resize(LogicalSize::new(30.0, 32.0), 1.0).unwrap();
    let b = c.buffer(Layer::Trail).unwrap();
    assert!(b.data().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn zero_size_drops_buffers() {
    let mut c = TrailCompositor::new(config()).unwrap();
    c.resize(LogicalSize::new(16.0, 16.0), 1.0).unwrap();
    assert_eq!(
        c.resize(LogicalSize::new(0.0, 16.0), 1.0).unwrap(),
        ResizeOutcome::Empty
    );
    assert!(c.buffer_size().is_none());
}

#[test]
fn echo_holds_only_the_latest_stamp_while_trail_keeps_history() {
    for fade in [FadeMethod::ColorMatrix, FadeMethod::AlphaOverlay] {
        let mut c = TrailCompositor::new(Arc::new(config().with_fade(fade))).unwrap();
        let mut s = surface(64.0, 32.0);
        c.resize(LogicalSize::new(64.0, 32.0), 1.0).unwrap();

        c.composite(&at(12.0, 16.0), &mut s).unwrap();
        c.composite(&at(48.0, 16.0), &mut s).unwrap();

        let echo = c.buffer(Layer::Echo).unwrap();
        assert_eq!(echo.pixel(12, 16), Some([0, 0, 0, 0]), "{fade}: echo ghosted");
        assert_eq!(echo.pixel(48, 16).unwrap()[3], 255);
        assert_eq!(echo.pixel(30, 16), Some([0, 0, 0, 0]));

        let trail = c.buffer(Layer::Trail).unwrap();
        let old = trail.pixel(12, 16).unwrap();
        let new = trail.pixel(48, 16).unwrap();
        let teal = Rgba8::rgb(0x63, 0xB5, 0xB5).to_premul();
        assert_eq!(new, teal);
        assert!(old[1] < teal[1] && old[1] > 0, "{fade}: old stamp {old:?}");
    }
}

#[test]
fn surface_receives_trail_then_echo() {
    let mut c = TrailCompositor::new(config()).unwrap();
    let mut s = surface(32.0, 32.0);
    c.resize(LogicalSize::new(32.0, 32.0), 1.0).unwrap();
    assert!(c.composite(&at(16.0, 16.0), &mut s).unwrap());
    assert_eq!(s.layers_drawn(), 2);

    let f = s.frame();
    let idx = (16 * 32 + 16) * 4;
    // Echo (yellow) is drawn on top of the trail stamp.
    assert_eq!(&f.data[idx..idx + 4], &[0xFC, 0xEE, 0x03, 0xFF]);
    assert_eq!(&f.data[0..4], &[0, 0, 0, 255]);
}

#[test]
fn stamp_fades_to_background_over_one_trail_length() {
    let cfg = config()
        .with_frame_rate(FrameRate::new(10).unwrap())
        .with_trail_length(TrailLength::new(1).unwrap())
        .with_fade(FadeMethod::ColorMatrix);
    let mut c = TrailCompositor::new(Arc::new(cfg)).unwrap();
    assert_eq!(c.params().frames, 10);
    let mut s = surface(64.0, 16.0);
    c.resize(LogicalSize::new(64.0, 16.0), 1.0).unwrap();

    c.composite(&at(8.0, 8.0), &mut s).unwrap();
    for _ in 0..10 {
        c.composite(&at(56.0, 8.0), &mut s).unwrap();
    }
    let px = c.buffer(Layer::Trail).unwrap().pixel(8, 8).unwrap();
    assert_eq!(px, [0, 0, 0, 255]);
}

#[test]
fn default_trail_is_gone_after_one_trail_length() {
    for fade in [FadeMethod::ColorMatrix, FadeMethod::AlphaOverlay] {
        let cfg = TrailConfig::default().with_fade(fade);
        let mut c = TrailCompositor::new(Arc::new(cfg)).unwrap();
        assert_eq!(c.params().frames, 90);
        let mut s = surface(128.0, 48.0);
        c.resize(LogicalSize::new(128.0, 48.0), 1.0).unwrap();

        c.composite(&at(24.0, 24.0), &mut s).unwrap();
        let start = c.buffer(Layer::Trail).unwrap().pixel(24, 24).unwrap();
        assert_eq!(start, Rgba8::rgb(0x63, 0xB5, 0xB5).to_premul());
        for _ in 0..90 {
            c.composite(&at(104.0, 24.0), &mut s).unwrap();
        }

        let trail = c.buffer(Layer::Trail).unwrap();
        for y in 0..48u16 {
            for x in 0..50u16 {
                let px = trail.pixel(x, y).unwrap();
                assert!(
                    px[0] <= 1 && px[1] <= 1 && px[2] <= 1 && px[3] == 255,
                    "{fade}: residual {px:?} at ({x}, {y})"
                );
            }
        }
    }
}

#[test]
fn config_swap_rebuilds_fade_params_only_when_needed() {
    let mut c = TrailCompositor::new(config()).unwrap();
    let before = *c.params();
    c.set_config(Arc::new(c.config().with_echo_color(Rgba8::rgb(1, 2, 3))))
        .unwrap();
    assert_eq!(*c.params(), before);

    c.set_config(Arc::new(
        c.config().with_trail_length(TrailLength::new(1).unwrap()),
    ))
    .unwrap();
    assert_eq!(c.params().frames, 30);
    assert!(c.params().amount > before.amount);
}

#[test]
fn release_makes_composite_a_noop() {
    let mut c = TrailCompositor::new(config()).unwrap();
    let mut s = surface(16.0, 16.0);
    c.resize(LogicalSize::new(16.0, 16.0), 1.0).unwrap();
    c.release();
    assert!(!c.composite(&at(8.0, 8.0), &mut s).unwrap());
}

#[test]
fn canvas_handle_shares_one_compositor() {
    let canvas = TrailCanvas::new(config()).unwrap();
    let host = canvas.clone();
    std::thread::spawn(move || host.resize(LogicalSize::new(20.0, 10.0), 1.0).unwrap())
        .join()
        .unwrap();
    let size = canvas.with(|c| c.buffer_size()).unwrap();
    assert_eq!(size, Some(PhysicalSize::new(20, 10)));
}
