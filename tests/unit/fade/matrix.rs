use super::*;
use crate::config::{FrameRate, TrailLength};
use crate::fade::AlphaOverlayFade;

fn params(bg: Rgba8) -> FadeParams {
    FadeParams::new(TrailLength::new(3).unwrap(), FrameRate::new(30).unwrap(), bg)
}

#[test]
fn identity_keeps_pixels() {
    for px in [[0u8, 0, 0, 0], [10, 20, 30, 255], [50, 40, 30, 128], [255, 255, 255, 255]] {
        assert_eq!(ColorMatrix::IDENTITY.apply_premul(px), px);
    }
}

#[test]
fn full_fade_lands_on_background() {
    let m = ColorMatrix::fade_to(Rgba8::rgb(200, 100, 50), 1.0);
    assert_eq!(m.apply_premul([0, 255, 255, 255]), [200, 100, 50, 255]);
}

#[test]
fn fade_keeps_alpha() {
    let m = ColorMatrix::fade_to(Rgba8::rgb(255, 255, 255), 0.5);
    let out = m.apply_premul([0, 0, 0, 128]);
    assert_eq!(out[3], 128);
    // Unpremultiplied black moves halfway to white, then re-premultiplies.
    assert!((i32::from(out[0]) - 64).abs() <= 1, "{out:?}");
}

#[test]
fn background_pixels_are_fixed_points() {
    let p = params(Rgba8::rgb(40, 80, 120));
    let mut px = [40u8, 80, 120, 255].repeat(8);
    let before = px.clone();
    ColorMatrixFade.apply(&p, &mut px).unwrap();
    assert_eq!(px, before);
}

#[test]
fn tracks_the_overlay_fade_up_to_rounding() {
    let p = params(Rgba8::BLACK);
    let mut a = vec![99u8, 181, 181, 255];
    let mut b = a.clone();
    for _ in 0..20 {
        ColorMatrixFade.apply(&p, &mut a).unwrap();
        AlphaOverlayFade.apply(&p, &mut b).unwrap();
    }
    for i in 0..4 {
        assert!(
            (i32::from(a[i]) - i32::from(b[i])).abs() <= 4,
            "channel {i}: matrix {} vs overlay {}",
            a[i],
            b[i]
        );
    }
    assert!(a[1] < 181);
}

#[test]
fn method_tag_matches() {
    assert_eq!(FadeMethod::ColorMatrix.fade().method(), FadeMethod::ColorMatrix);
}
