pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Convert a unit float into a byte, rounding half away from zero.
pub(crate) fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

// Float noise tolerated around an integer result.
const SNAP_EPS: f64 = 1e-3;

/// Quantize `value`, the next value of a channel currently at `current`, rounding in the
/// direction it moved.
///
/// A channel converging on an integer target with a per-step fraction therefore moves at least
/// one step per application and never overshoots the target.
pub(crate) fn quantize_toward(value: f64, current: u8) -> u8 {
    let cur = f64::from(current);
    let v = if value > cur + SNAP_EPS {
        (value - SNAP_EPS).ceil()
    } else if value < cur - SNAP_EPS {
        (value + SNAP_EPS).floor()
    } else {
        cur
    };
    v.clamp(0.0, 255.0) as u8
}

/// Wrap an angle in radians into `(-pi, pi]`.
pub(crate) fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};

    if !angle.is_finite() {
        return 0.0;
    }
    if angle > PI || angle <= -PI {
        angle = angle.rem_euclid(TAU);
        if angle > PI {
            angle -= TAU;
        }
    }
    angle
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
