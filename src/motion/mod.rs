//! Motion models advancing the object once per timer tick.

pub(crate) mod random_walk;
pub(crate) mod ship_drift;

use crate::foundation::core::{BezPath, LogicalSize, Point};
use serde::{Deserialize, Serialize};

pub use random_walk::RandomWalk;
pub use ship_drift::ShipDrift;

/// Circle of radius 20 centred on the origin.
pub const CIRCLE_OUTLINE: &str = "M 20 0 A 20 20 0 0 0 -20 0 A 20 20 0 0 0 20 0 Z";

/// 20 x 50 hull with a quadratic bow pointing toward -y, centred on the origin.
pub const SHIP_OUTLINE: &str = "M -10 25 H 10 V -5 Q 10 -15 0 -25 Q -10 -15 -10 -5 Z";

/// Velocities in the body-fixed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyVelocity {
    /// Surge (forward) velocity.
    pub u: f64,
    /// Sway (sideways) velocity.
    pub v: f64,
    /// Yaw rate in radians per step.
    pub r: f64,
}

/// Object pose read by the compositor and advanced by a [`MotionModel`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    /// Position in logical units.
    pub position: Point,
    /// Heading in radians.
    pub heading: f64,
    /// Body-frame velocities. Only ship drift reads or writes them.
    pub velocity: BodyVelocity,
}

impl ObjectState {
    /// Object at rest at `position` with zero heading.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Selectable motion model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionKind {
    /// Random-walk circle clamped to the surface.
    #[default]
    RandomWalk,
    /// Rigid-body ship drifting in a constant current.
    ShipDrift,
}

impl MotionKind {
    /// SVG path data of the outline that goes with this model.
    pub fn default_outline(self) -> &'static str {
        match self {
            MotionKind::RandomWalk => CIRCLE_OUTLINE,
            MotionKind::ShipDrift => SHIP_OUTLINE,
        }
    }

    /// Build the strategy object for this model.
    ///
    /// `outline` sizes the random walk; `seed` makes it reproducible.
    pub fn create(self, outline: &BezPath, seed: Option<u64>) -> Box<dyn MotionModel> {
        match self {
            MotionKind::RandomWalk => Box::new(RandomWalk::for_outline(outline, seed)),
            MotionKind::ShipDrift => Box::new(ShipDrift::new()),
        }
    }
}

impl std::fmt::Display for MotionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MotionKind::RandomWalk => "random-walk",
            MotionKind::ShipDrift => "ship-drift",
        })
    }
}

/// Fixed-step motion strategy.
pub trait MotionModel: Send {
    /// Which model this is.
    fn kind(&self) -> MotionKind;

    /// Produce the state one step after `state`. `bounds` is the logical surface size.
    fn advance(&mut self, state: &ObjectState, bounds: LogicalSize) -> ObjectState;
}
