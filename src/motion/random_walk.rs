use crate::foundation::core::{BezPath, LogicalSize, Point};
use crate::motion::{MotionKind, MotionModel, ObjectState};
use kurbo::Shape;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random walk that keeps the whole outline inside the surface.
#[derive(Debug)]
pub struct RandomWalk {
    radius: f64,
    move_amount: f64,
    rng: StdRng,
}

impl RandomWalk {
    /// Walk with the given radius; each axis moves by up to `radius / 2` per step.
    pub fn new(radius: f64, seed: Option<u64>) -> Self {
        let radius = radius.max(0.0);
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            radius,
            move_amount: radius / 2.0,
            rng,
        }
    }

    /// Walk sized from an outline: radius is half the bounding box width.
    pub fn for_outline(outline: &BezPath, seed: Option<u64>) -> Self {
        Self::new(outline.bounding_box().width() / 2.0, seed)
    }

    /// Override the per-axis step bound.
    pub fn with_move_amount(mut self, move_amount: f64) -> Self {
        self.move_amount = move_amount.max(0.0);
        self
    }

    /// Radius used for clamping.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Per-axis step bound.
    pub fn move_amount(&self) -> f64 {
        self.move_amount
    }

    fn offset(&mut self) -> f64 {
        if self.move_amount == 0.0 {
            return 0.0;
        }
        (self.rng.random::<f64>() * 2.0 - 1.0) * self.move_amount
    }
}

// Upper bound applied first so a surface narrower than the outline pins to `radius`.
fn clamp_axis(v: f64, radius: f64, extent: f64) -> f64 {
    radius.max((extent - radius).min(v))
}

impl MotionModel for RandomWalk {
    fn kind(&self) -> MotionKind {
        MotionKind::RandomWalk
    }

    fn advance(&mut self, state: &ObjectState, bounds: LogicalSize) -> ObjectState {
        let x = state.position.x + self.offset();
        let y = state.position.y + self.offset();

        ObjectState {
            position: Point::new(
                clamp_axis(x, self.radius, bounds.width),
                clamp_axis(y, self.radius, bounds.height),
            ),
            ..*state
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/random_walk.rs"]
mod tests;
