//! Per-frame trail fade toward the background color.
//!
//! Both algorithms share [`fade_amount`]: after `N` frames (one trail length) a stamp keeps at
//! most `1/255` of its original contribution.

pub(crate) mod matrix;
pub(crate) mod overlay;
pub(crate) mod params;

use crate::foundation::error::{TrailError, TrailResult};
use serde::{Deserialize, Serialize};

pub use matrix::{ColorMatrix, ColorMatrixFade};
pub use overlay::AlphaOverlayFade;
pub use params::{FadeParams, fade_amount, overlay_alpha, trail_frames};

/// Selectable fade algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FadeMethod {
    /// Source-over fill of the background color at the overlay alpha.
    AlphaOverlay,
    /// Per-channel affine blend toward the background, alpha unchanged.
    #[default]
    ColorMatrix,
}

impl FadeMethod {
    /// The implementation for this method.
    pub fn fade(self) -> &'static dyn Fade {
        match self {
            FadeMethod::AlphaOverlay => &AlphaOverlayFade,
            FadeMethod::ColorMatrix => &ColorMatrixFade,
        }
    }
}

impl std::fmt::Display for FadeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FadeMethod::AlphaOverlay => "alpha-overlay",
            FadeMethod::ColorMatrix => "color-matrix",
        })
    }
}

/// One fade step over a premultiplied RGBA8 buffer.
pub trait Fade: Sync {
    /// Which method this implements.
    fn method(&self) -> FadeMethod;

    /// Decay `pixels` one frame toward the background described by `params`.
    fn apply(&self, params: &FadeParams, pixels: &mut [u8]) -> TrailResult<()>;
}

// Bytes per rayon task.
pub(crate) const PAR_CHUNK_BYTES: usize = 64 * 1024;

pub(crate) fn check_rgba8(pixels: &[u8]) -> TrailResult<()> {
    if !pixels.len().is_multiple_of(4) {
        return Err(TrailError::render(
            "fade expects a tightly packed rgba8 buffer",
        ));
    }
    Ok(())
}
