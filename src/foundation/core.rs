use crate::foundation::error::{TrailError, TrailResult};
use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Affine, BezPath, Point};

/// Surface size in logical (resolution-independent) units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalSize {
    /// Width in logical units.
    pub width: f64,
    /// Height in logical units.
    pub height: f64,
}

impl LogicalSize {
    /// Create a logical size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Centre point of the surface in logical units.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Convert into device pixels, rounding each axis up.
    ///
    /// Non-positive or non-finite scale factors are treated as `1.0`.
    pub fn to_physical(self, scale_factor: f64) -> TrailResult<PhysicalSize> {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };

        fn axis(v: f64, scale: f64, name: &str) -> TrailResult<u16> {
            if !v.is_finite() || v <= 0.0 {
                return Ok(0);
            }
            let px = (v * scale).ceil();
            if px > f64::from(u16::MAX) {
                return Err(TrailError::validation(format!(
                    "surface {name} of {px} physical pixels exceeds {}",
                    u16::MAX
                )));
            }
            Ok(px as u16)
        }

        Ok(PhysicalSize {
            width: axis(self.width, scale, "width")?,
            height: axis(self.height, scale, "height")?,
        })
    }
}

/// Surface size in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PhysicalSize {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl PhysicalSize {
    /// Create a physical size.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Return `true` when either axis has no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn byte_len(self) -> usize {
        usize::from(self.width) * usize::from(self.height) * 4
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from channels including alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }

    /// `#RRGGBBAA` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl std::fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
