use crate::fade::{Fade, FadeMethod, FadeParams, PAR_CHUNK_BYTES, check_rgba8};
use crate::foundation::core::Rgba8;
use crate::foundation::error::TrailResult;
use crate::foundation::math::quantize_toward;
use rayon::prelude::*;

/// Row-major 4x5 color matrix over unpremultiplied, normalized `[r, g, b, a, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    /// Matrix that leaves every pixel unchanged.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0, //
    ]);

    /// `out = in * (1 - amount) + background * amount` per RGB channel, alpha unchanged.
    pub fn fade_to(background: Rgba8, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let keep = 1.0 - amount;
        let tr = f32::from(background.r) / 255.0;
        let tg = f32::from(background.g) / 255.0;
        let tb = f32::from(background.b) / 255.0;
        Self([
            keep, 0.0, 0.0, 0.0, amount * tr, //
            0.0, keep, 0.0, 0.0, amount * tg, //
            0.0, 0.0, keep, 0.0, amount * tb, //
            0.0, 0.0, 0.0, 1.0, 0.0, //
        ])
    }

    /// Transform one premultiplied pixel.
    ///
    /// Channels are quantized in the direction they moved, so a fade reaches its target exactly.
    pub fn apply_premul(&self, px: [u8; 4]) -> [u8; 4] {
        let a = px[3];
        let inv_a = if a == 0 { 0.0 } else { 1.0 / f32::from(a) };
        let src = [
            f32::from(px[0]) * inv_a,
            f32::from(px[1]) * inv_a,
            f32::from(px[2]) * inv_a,
            f32::from(a) / 255.0,
        ];

        let m = &self.0;
        let mut out = [0.0f32; 4];
        for (row, o) in out.iter_mut().enumerate() {
            let r = &m[row * 5..row * 5 + 5];
            *o = (r[0] * src[0] + r[1] * src[1] + r[2] * src[2] + r[3] * src[3] + r[4])
                .clamp(0.0, 1.0);
        }

        let out_a = f64::from(out[3]);
        let premul = |i: usize| quantize_toward(f64::from(out[i]) * out_a * 255.0, px[i]);
        [premul(0), premul(1), premul(2), quantize_toward(out_a * 255.0, a)]
    }
}

/// Resamples the buffer through [`FadeParams::matrix`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorMatrixFade;

impl Fade for ColorMatrixFade {
    fn method(&self) -> FadeMethod {
        FadeMethod::ColorMatrix
    }

    fn apply(&self, params: &FadeParams, pixels: &mut [u8]) -> TrailResult<()> {
        check_rgba8(pixels)?;
        let matrix = params.matrix;
        pixels.par_chunks_mut(PAR_CHUNK_BYTES).for_each(|chunk| {
            for px in chunk.chunks_exact_mut(4) {
                let out = matrix.apply_premul([px[0], px[1], px[2], px[3]]);
                px.copy_from_slice(&out);
            }
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fade/matrix.rs"]
mod tests;
