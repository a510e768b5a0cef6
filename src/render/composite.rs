use crate::foundation::core::Rgba8;
use crate::foundation::error::{TrailError, TrailResult};
use crate::foundation::math::{mul_div255_u8, quantize_toward};

/// Premultiplied `[r, g, b, a]` pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over blend of premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// `dst = src over dst` for equal-length premultiplied RGBA8 buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> TrailResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TrailError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Source-over a translucent `color` (straight alpha) onto every pixel of `dst`.
///
/// Repeated application converges on the opaque color. Each channel is quantized in the
/// direction it moved, so no pixel stalls short of the color because of 8-bit rounding.
pub fn fade_over_in_place(dst: &mut [u8], color: Rgba8) {
    if color.a == 0 {
        return;
    }
    let sa = f64::from(color.a) / 255.0;
    let keep = 1.0 - sa;
    let src = [
        f64::from(color.r) * sa,
        f64::from(color.g) * sa,
        f64::from(color.b) * sa,
        f64::from(color.a),
    ];
    for d in dst.chunks_exact_mut(4) {
        for (c, s) in d.iter_mut().zip(src) {
            *c = quantize_toward(s + f64::from(*c) * keep, *c);
        }
    }
}

/// Overwrite every pixel of `dst` with `color`.
pub fn clear(dst: &mut [u8], color: PremulRgba8) {
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
