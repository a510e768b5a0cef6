use crate::config::{FrameRate, TrailConfig, TrailLength};
use crate::fade::matrix::ColorMatrix;
use crate::foundation::core::Rgba8;
use crate::foundation::math::unit_to_u8;

/// Frames spanning one trail length: `trail_secs * 1000 / interval_ms`, at least 1.
pub fn trail_frames(trail_secs: u32, interval_ms: u32) -> u32 {
    if interval_ms == 0 {
        return 1;
    }
    (trail_secs.saturating_mul(1000) / interval_ms).max(1)
}

/// Per-frame blend fraction `1 - (1/255)^(1/N)`.
pub fn fade_amount(frames: u32) -> f64 {
    let n = f64::from(frames.max(1));
    1.0 - (1.0f64 / 255.0).powf(1.0 / n)
}

/// Overlay alpha byte for a fade amount, rounded half away from zero.
pub fn overlay_alpha(amount: f64) -> u8 {
    unit_to_u8(amount)
}

/// Derived fade state. Rebuilt whenever trail length, frame rate or background changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeParams {
    /// Frames spanning one trail length.
    pub frames: u32,
    /// Per-frame blend fraction toward the background.
    pub amount: f64,
    /// Background at the overlay alpha, used by the alpha-overlay fade.
    pub overlay: Rgba8,
    /// Background blend matrix, used by the color-matrix fade.
    pub matrix: ColorMatrix,
}

impl FadeParams {
    /// Derive parameters from the three inputs.
    pub fn new(trail_length: TrailLength, frame_rate: FrameRate, background: Rgba8) -> Self {
        let frames = trail_frames(trail_length.secs(), frame_rate.interval_ms());
        let amount = fade_amount(frames);
        Self {
            frames,
            amount,
            overlay: background.with_alpha(overlay_alpha(amount)),
            matrix: ColorMatrix::fade_to(background, amount as f32),
        }
    }

    /// Derive parameters from a configuration snapshot.
    pub fn from_config(cfg: &TrailConfig) -> Self {
        Self::new(cfg.trail_length, cfg.frame_rate, cfg.background)
    }

    /// Return `true` when `cfg` changes any input these parameters depend on.
    pub fn is_stale_for(prev: &TrailConfig, next: &TrailConfig) -> bool {
        prev.trail_length != next.trail_length
            || prev.frame_rate != next.frame_rate
            || prev.background != next.background
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fade/params.rs"]
mod tests;
