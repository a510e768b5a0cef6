use crate::foundation::core::{LogicalSize, Point};
use crate::foundation::math::normalize_angle;
use crate::motion::{BodyVelocity, MotionKind, MotionModel, ObjectState};

/// Mass (kg).
pub const MASS: f64 = 50_000.0;
/// Yaw moment of inertia (kg m^2).
pub const INERTIA_Z: f64 = 8.0e6;
/// Linear surge damping (N per m/s).
pub const SURGE_DAMPING: f64 = 80_000.0;
/// Linear sway damping (N per m/s).
pub const SWAY_DAMPING: f64 = 100_000.0;
/// Linear yaw damping (Nm per rad/s).
pub const YAW_DAMPING: f64 = 5.0e6;
/// Amplitude of the asymmetry yaw moment (Nm).
pub const YAW_ASYMMETRY: f64 = 3.0e6;
/// Ocean current in the global frame, `(east, north)` in m/s.
pub const CURRENT: (f64, f64) = (-0.5, 0.5);
/// Integration step.
pub const STEP: f64 = 1.0;

/// Surge/sway/yaw rigid body drifting in a constant current.
///
/// Position is never clamped: the ship is free to sail off the surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShipDrift;

impl ShipDrift {
    /// Create the model.
    pub fn new() -> Self {
        Self
    }

    /// Direction of the current, measured the same way as the heading reference.
    pub fn current_direction() -> f64 {
        CURRENT.0.atan2(CURRENT.1)
    }
}

impl MotionModel for ShipDrift {
    fn kind(&self) -> MotionKind {
        MotionKind::ShipDrift
    }

    fn advance(&mut self, state: &ObjectState, _bounds: LogicalSize) -> ObjectState {
        let BodyVelocity { mut u, mut v, mut r } = state.velocity;
        let psi = state.heading;
        let dt = STEP;
        let (ux, uy) = CURRENT;

        let (sin_psi, cos_psi) = psi.sin_cos();

        // Current seen from the body frame.
        let u_c = cos_psi * ux + sin_psi * uy;
        let v_c = -sin_psi * ux + cos_psi * uy;
        let u_rel = u - u_c;
        let v_rel = v - v_c;

        let du = (v * r - (SURGE_DAMPING / MASS) * u_rel) * dt;
        let dv = (-u * r - (SWAY_DAMPING / MASS) * v_rel) * dt;
        let dr = ((-YAW_DAMPING * r + YAW_ASYMMETRY * (psi - Self::current_direction()).sin())
            / INERTIA_Z)
            * dt;

        u += du;
        v += dv;
        r += dr;
        let heading = normalize_angle(psi + r * dt);

        // Kinematics use the heading from the start of the step.
        let dx = (u * cos_psi - v * sin_psi) * dt;
        let dy = (u * sin_psi + v * cos_psi) * dt;

        ObjectState {
            position: Point::new(state.position.x + dx, state.position.y + dy),
            heading,
            velocity: BodyVelocity { u, v, r },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/ship_drift.rs"]
mod tests;
