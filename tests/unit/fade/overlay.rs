use super::*;
use crate::config::{FrameRate, TrailLength};
use crate::foundation::core::Rgba8;

fn params(bg: Rgba8) -> FadeParams {
    FadeParams::new(TrailLength::new(3).unwrap(), FrameRate::new(30).unwrap(), bg)
}

#[test]
fn background_pixels_are_fixed_points() {
    let p = params(Rgba8::rgb(40, 80, 120));
    let mut px = [40u8, 80, 120, 255].repeat(16);
    let before = px.clone();
    AlphaOverlayFade.apply(&p, &mut px).unwrap();
    assert_eq!(px, before);
}

#[test]
fn stamp_decays_toward_black() {
    let p = params(Rgba8::BLACK);
    let mut px = vec![255u8, 255, 255, 255];
    let mut prev = 255u8;
    for _ in 0..30 {
        AlphaOverlayFade.apply(&p, &mut px).unwrap();
        assert!(px[0] <= prev);
        assert_eq!(px[3], 255);
        prev = px[0];
    }
    // (240/255)^30 ~= 0.16
    assert!(px[0] < 60 && px[0] > 20, "after 30 frames: {}", px[0]);
}

#[test]
fn transparent_pixels_gain_background_alpha() {
    let p = params(Rgba8::BLACK);
    let mut px = vec![0u8; 4];
    AlphaOverlayFade.apply(&p, &mut px).unwrap();
    assert_eq!(px, vec![0, 0, 0, p.overlay.a]);
}

#[test]
fn rejects_ragged_buffers() {
    let p = params(Rgba8::BLACK);
    assert!(AlphaOverlayFade.apply(&p, &mut [0u8; 5]).is_err());
}

#[test]
fn method_tag_matches() {
    assert_eq!(AlphaOverlayFade.method(), FadeMethod::AlphaOverlay);
    assert_eq!(FadeMethod::AlphaOverlay.fade().method(), FadeMethod::AlphaOverlay);
}
