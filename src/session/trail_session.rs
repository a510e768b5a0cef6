use crate::config::{FrameRate, TrailConfig, TrailLength};
use crate::fade::FadeMethod;
use crate::foundation::core::{LogicalSize, Rgba8};
use crate::foundation::error::TrailResult;
use crate::motion::{MotionKind, MotionModel, ObjectState};
use crate::render::compositor::{ResizeOutcome, TrailCanvas};
use crate::render::surface::{DisplaySurface, FrameSurface};
use crate::session::sink::{FrameSink, SinkConfig};
use crate::session::timer::FrameTimer;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counters for a session, the headless counterpart of an FPS overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Motion steps taken.
    pub ticks: u64,
    /// Redraws that composited a frame.
    pub frames_drawn: u64,
    /// Redraws skipped because buffers were not allocated.
    pub frames_skipped: u64,
    /// Buffer reallocations caused by surface resizes.
    pub reallocations: u64,
}

/// The presentation loop: a fixed-rate timer advancing the motion model, and host-driven
/// redraws compositing the current state.
///
/// A tick only marks the surface dirty; drawing happens in [`redraw`](Self::redraw).
pub struct TrailSession {
    config: Arc<TrailConfig>,
    canvas: TrailCanvas,
    motion: Box<dyn MotionModel>,
    state: ObjectState,
    bounds: LogicalSize,
    scale_factor: f64,
    timer: FrameTimer,
    redraw_requested: bool,
    torn_down: bool,
    stats: SessionStats,
}

impl TrailSession {
    /// Build a session for `config`. No buffers exist until the first resize.
    pub fn new(config: TrailConfig) -> TrailResult<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let outline = config.outline_path()?;
        let motion = config.motion.create(&outline, config.seed);
        Ok(Self {
            canvas: TrailCanvas::new(config.clone())?,
            timer: FrameTimer::new(config.frame_rate.interval()),
            config,
            motion,
            state: ObjectState::default(),
            bounds: LogicalSize::new(0.0, 0.0),
            scale_factor: 1.0,
            redraw_requested: false,
            torn_down: false,
            stats: SessionStats::default(),
        })
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Current object state.
    pub fn state(&self) -> &ObjectState {
        &self.state
    }

    /// Counters so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Handle to the compositor, shareable with host callbacks.
    pub fn canvas(&self) -> &TrailCanvas {
        &self.canvas
    }

    /// Timer driving the ticks.
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Motion model currently bound.
    pub fn motion_kind(&self) -> MotionKind {
        self.motion.kind()
    }

    /// Return `true` when a tick has happened since the last redraw.
    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// Start the timer at `now`.
    pub fn start(&mut self, now: Instant) {
        if !self.torn_down {
            self.timer.start(now);
        }
    }

    /// Host resize callback: reallocate buffers for the new geometry.
    ///
    /// After a reallocation the object is re-centred with zero heading. Velocities carry over.
    #[tracing::instrument(skip(self))]
    pub fn on_resize(&mut self, logical: LogicalSize, scale_factor: f64) -> TrailResult<()> {
        self.bounds = logical;
        self.scale_factor = scale_factor;
        if self.torn_down {
            return Ok(());
        }
        if let ResizeOutcome::Reallocated(_) = self.canvas.resize(logical, scale_factor)? {
            self.stats.reallocations += 1;
            self.state = ObjectState {
                position: logical.center(),
                heading: 0.0,
                ..self.state
            };
        }
        Ok(())
    }

    /// Advance the motion model one step and request a redraw.
    pub fn tick(&mut self) {
        if self.torn_down {
            return;
        }
        self.state = self.motion.advance(&self.state, self.bounds);
        self.stats.ticks += 1;
        self.redraw_requested = true;
    }

    /// Tick if the timer is due at `now`. Returns whether a tick happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.poll(now) {
            self.tick();
            return true;
        }
        false
    }

    /// Host redraw callback: composite the current state onto `surface`.
    ///
    /// A surface whose geometry changed since the last resize is resized first. Returns whether
    /// a frame was drawn.
    pub fn redraw(&mut self, surface: &mut dyn DisplaySurface) -> TrailResult<bool> {
        if self.torn_down {
            return Ok(false);
        }
        let logical = surface.logical_size();
        let scale = surface.scale_factor();
        if logical != self.bounds || scale != self.scale_factor {
            self.on_resize(logical, scale)?;
        }

        self.redraw_requested = false;
        let drawn = self.canvas.composite(&self.state, surface)?;
        if drawn {
            self.stats.frames_drawn += 1;
        } else {
            self.stats.frames_skipped += 1;
        }
        Ok(drawn)
    }

    fn swap_config(&mut self, next: TrailConfig) -> TrailResult<()> {
        let next = Arc::new(next);
        self.canvas.set_config(next.clone())?;
        self.config = next;
        Ok(())
    }

    /// Change the trail length.
    pub fn set_trail_length(&mut self, trail_length: TrailLength) -> TrailResult<()> {
        tracing::info!(secs = trail_length.secs(), "trail length set");
        self.swap_config(self.config.with_trail_length(trail_length))
    }

    /// Change the background color. Existing buffer content is kept and fades toward it.
    pub fn set_background(&mut self, color: Rgba8) -> TrailResult<()> {
        tracing::info!(color = %color, "background color set");
        self.swap_config(self.config.with_background(color))
    }

    /// Change the trail stamp color.
    pub fn set_trail_color(&mut self, color: Rgba8) -> TrailResult<()> {
        tracing::info!(color = %color, "trail color set");
        self.swap_config(self.config.with_trail_color(color))
    }

    /// Change the echo stamp color.
    pub fn set_echo_color(&mut self, color: Rgba8) -> TrailResult<()> {
        tracing::info!(color = %color, "echo color set");
        self.swap_config(self.config.with_echo_color(color))
    }

    /// Change the frame rate; the timer picks up the new interval from `now`.
    pub fn set_frame_rate(&mut self, frame_rate: FrameRate, now: Instant) -> TrailResult<()> {
        tracing::info!(
            fps = frame_rate.fps(),
            interval_ms = frame_rate.interval_ms(),
            "fps set"
        );
        self.swap_config(self.config.with_frame_rate(frame_rate))?;
        self.timer.set_interval(frame_rate.interval(), now);
        Ok(())
    }

    /// Change the fade algorithm.
    pub fn set_fade_method(&mut self, fade: FadeMethod) -> TrailResult<()> {
        tracing::info!(method = %fade, "drawing method set");
        self.swap_config(self.config.with_fade(fade))
    }

    /// Change the motion model and its outline. Position and velocities carry over.
    pub fn set_motion(&mut self, motion: MotionKind) -> TrailResult<()> {
        tracing::info!(model = %motion, "object movement set");
        let next = self.config.with_motion(motion);
        let outline = next.outline_path()?;
        let strategy = motion.create(&outline, next.seed);
        self.swap_config(next)?;
        self.motion = strategy;
        Ok(())
    }

    /// Stop the timer and release both buffers. The session is inert afterwards.
    pub fn teardown(&mut self) -> TrailResult<()> {
        self.timer.stop();
        self.redraw_requested = false;
        self.torn_down = true;
        self.canvas.release()
    }

    /// Tick and redraw `frames` times back to back, pushing every presented frame into `sink`.
    #[tracing::instrument(skip(self, surface, sink))]
    pub fn run_headless(
        &mut self,
        frames: u64,
        surface: &mut FrameSurface,
        sink: &mut dyn FrameSink,
    ) -> TrailResult<SessionStats> {
        self.begin_sink(surface, sink)?;
        for idx in 0..frames {
            self.tick();
            if self.redraw(surface)? {
                sink.push_frame(idx, surface.frame())?;
            }
        }
        sink.end()?;
        Ok(self.stats)
    }

    /// Like [`run_headless`](Self::run_headless), but paced by the frame timer in real time.
    #[tracing::instrument(skip(self, surface, sink))]
    pub fn run_realtime(
        &mut self,
        frames: u64,
        surface: &mut FrameSurface,
        sink: &mut dyn FrameSink,
    ) -> TrailResult<SessionStats> {
        self.begin_sink(surface, sink)?;
        self.start(Instant::now());
        let mut idx = 0;
        while idx < frames && self.timer.is_running() {
            let now = Instant::now();
            if !self.poll(now) {
                let wait = self.timer.until_next(now).unwrap_or(Duration::ZERO);
                std::thread::sleep(wait);
                continue;
            }
            if self.redraw(surface)? {
                sink.push_frame(idx, surface.frame())?;
            }
            idx += 1;
        }
        self.timer.stop();
        sink.end()?;
        Ok(self.stats)
    }

    fn begin_sink(&mut self, surface: &FrameSurface, sink: &mut dyn FrameSink) -> TrailResult<()> {
        self.on_resize(surface.logical_size(), surface.scale_factor())?;
        let size = surface
            .logical_size()
            .to_physical(surface.scale_factor())?;
        sink.begin(SinkConfig {
            width: u32::from(size.width),
            height: u32::from(size.height),
            fps: self.config.frame_rate.fps(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/trail_session.rs"]
mod tests;
