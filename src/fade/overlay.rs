use crate::fade::{Fade, FadeMethod, FadeParams, PAR_CHUNK_BYTES, check_rgba8};
use crate::foundation::error::TrailResult;
use crate::render::composite::fade_over_in_place;
use rayon::prelude::*;

/// Paints the background over the whole buffer at the overlay alpha (source-over).
///
/// Existing content decays geometrically toward the background, one overlay per frame, and
/// reaches it exactly.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlphaOverlayFade;

impl Fade for AlphaOverlayFade {
    fn method(&self) -> FadeMethod {
        FadeMethod::AlphaOverlay
    }

    fn apply(&self, params: &FadeParams, pixels: &mut [u8]) -> TrailResult<()> {
        check_rgba8(pixels)?;
        let veil = params.overlay;
        if veil.a == 0 {
            return Ok(());
        }
        pixels
            .par_chunks_mut(PAR_CHUNK_BYTES)
            .for_each(|chunk| fade_over_in_place(chunk, veil));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fade/overlay.rs"]
mod tests;
