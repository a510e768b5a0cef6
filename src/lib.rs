//! Trail renders a moving object that leaves a fading trail and a one-frame echo.
//!
//! The crate is the compositing and motion core of a small animated widget:
//!
//! - **Motion**: a [`MotionModel`] advances an [`ObjectState`] once per timer tick
//!   ([`RandomWalk`] or [`ShipDrift`]).
//! - **Compositing**: a [`TrailCompositor`] owns two persistent raster buffers. Each redraw fades
//!   the trail buffer toward the background ([`FadeMethod`]), clears the echo buffer, stamps the
//!   object outline into both and presents them on a [`DisplaySurface`].
//! - **Presentation**: a [`TrailSession`] ties a [`FrameTimer`] to the motion model and the
//!   compositor, and exposes setters for every configuration choice.
//!
//! Pixels are premultiplied RGBA8 end to end. Logical units are converted to device pixels with
//! the surface scale factor.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Configuration snapshot and choices.
pub mod config;
/// Trail fade algorithms.
pub mod fade;
pub mod motion;
mod render;
mod session;

pub use crate::config::{FrameRate, Palette, TrailConfig, TrailLength, parse_color, parse_outline};
pub use crate::fade::{
    AlphaOverlayFade, ColorMatrix, ColorMatrixFade, Fade, FadeMethod, FadeParams, fade_amount,
    overlay_alpha, trail_frames,
};
pub use crate::foundation::core::{Affine, BezPath, LogicalSize, PhysicalSize, Point, Rgba8};
pub use crate::foundation::error::{TrailError, TrailResult};
pub use crate::motion::{
    BodyVelocity, CIRCLE_OUTLINE, MotionKind, MotionModel, ObjectState, RandomWalk, SHIP_OUTLINE,
    ShipDrift,
};
pub use crate::render::buffer::RasterBuffer;
pub use crate::render::compositor::{ResizeOutcome, TrailCanvas, TrailCompositor};
pub use crate::render::surface::{DisplaySurface, FrameRGBA, FrameSurface, Layer};
pub use crate::session::sink::{
    FrameSink, InMemorySink, LatestFrameSink, PngSequenceSink, SinkConfig, write_png,
};
pub use crate::session::timer::FrameTimer;
pub use crate::session::trail_session::{SessionStats, TrailSession};
