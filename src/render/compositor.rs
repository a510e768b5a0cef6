use crate::config::TrailConfig;
use crate::fade::FadeParams;
use crate::foundation::core::{BezPath, LogicalSize, PhysicalSize, Rgba8};
use crate::foundation::error::{TrailError, TrailResult};
use crate::motion::ObjectState;
use crate::render::buffer::{BufferPair, RasterBuffer};
use crate::render::stamp::{Stamper, stamp_transform};
use crate::render::surface::{DisplaySurface, Layer};
use std::sync::{Arc, Mutex, MutexGuard};

/// Outcome of a buffer resize request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Size unchanged; buffers kept.
    Unchanged,
    /// Both buffers were reallocated at the new size and cleared to the background.
    Reallocated(PhysicalSize),
    /// The surface has no pixels yet; buffers were dropped.
    Empty,
}

/// Owns the trail and echo buffers and composites one frame at a time.
pub struct TrailCompositor {
    config: Arc<TrailConfig>,
    params: FadeParams,
    outline: BezPath,
    scale_factor: f64,
    buffers: Option<BufferPair>,
    stamper: Stamper,
}

impl TrailCompositor {
    /// Create a compositor with no buffers; the first [`resize`](Self::resize) allocates them.
    pub fn new(config: Arc<TrailConfig>) -> TrailResult<Self> {
        config.validate()?;
        let outline = config.outline_path()?;
        Ok(Self {
            params: FadeParams::from_config(&config),
            config,
            outline,
            scale_factor: 1.0,
            buffers: None,
            stamper: Stamper::new(),
        })
    }

    /// Configuration snapshot currently in effect.
    pub fn config(&self) -> &Arc<TrailConfig> {
        &self.config
    }

    /// Fade parameters derived from the current snapshot.
    pub fn params(&self) -> &FadeParams {
        &self.params
    }

    /// Device scale factor of the last resize.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Physical size of the buffers, if allocated.
    pub fn buffer_size(&self) -> Option<PhysicalSize> {
        self.buffers.as_ref().map(BufferPair::size)
    }

    /// Borrow one of the buffers, if allocated.
    pub fn buffer(&self, layer: Layer) -> Option<&RasterBuffer> {
        self.buffers.as_ref().map(|b| match layer {
            Layer::Trail => &b.trail,
            Layer::Echo => &b.echo,
        })
    }

    /// Match the buffers to a surface of `logical` units at `scale_factor`.
    ///
    /// Any change in physical size discards both buffers and allocates new ones cleared to the
    /// background color.
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn resize(&mut self, logical: LogicalSize, scale_factor: f64) -> TrailResult<ResizeOutcome> {
        let size = logical.to_physical(scale_factor)?;
        self.scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };

        if size.is_empty() {
            if self.buffers.take().is_some() {
                self.stamper.release();
            }
            return Ok(ResizeOutcome::Empty);
        }
        if self.buffer_size() == Some(size) {
            return Ok(ResizeOutcome::Unchanged);
        }

        self.buffers = None;
        self.buffers = Some(BufferPair::new(size, self.config.background)?);
        tracing::debug!(
            width = size.width,
            height = size.height,
            background = %self.config.background,
            "reallocated trail and echo buffers"
        );
        Ok(ResizeOutcome::Reallocated(size))
    }

    /// Swap in a new configuration snapshot.
    ///
    /// Fade parameters are rebuilt only when trail length, frame rate or background changed.
    pub fn set_config(&mut self, next: Arc<TrailConfig>) -> TrailResult<()> {
        next.validate()?;
        if next.motion != self.config.motion || next.outline != self.config.outline {
            self.outline = next.outline_path()?;
        }
        if FadeParams::is_stale_for(&self.config, &next) {
            self.params = FadeParams::from_config(&next);
            tracing::info!(
                trail_secs = next.trail_length.secs(),
                interval_ms = next.frame_rate.interval_ms(),
                frames = self.params.frames,
                fade_amount = self.params.amount,
                overlay_alpha = self.params.overlay.a,
                "fade parameters updated"
            );
        }
        self.config = next;
        Ok(())
    }

    /// Fade, stamp and present both buffers for `state`.
    ///
    /// Returns `Ok(false)` without touching the surface when the buffers are not allocated yet.
    pub fn composite(
        &mut self,
        state: &ObjectState,
        surface: &mut dyn DisplaySurface,
    ) -> TrailResult<bool> {
        let Some(buffers) = self.buffers.as_mut() else {
            return Ok(false);
        };
        let size = buffers.size();
        if size.is_empty() {
            return Ok(false);
        }

        let cfg = &self.config;
        let transform = stamp_transform(state.position, state.heading, self.scale_factor);
        surface.begin_frame(size)?;

        // Trail first so the echo lands on top.
        let fade = cfg.fade.fade();
        fade.apply(&self.params, buffers.trail.data_mut())?;
        self.stamper
            .stamp(&mut buffers.trail, &self.outline, transform, cfg.trail_color)?;
        surface.draw_layer(Layer::Trail, &buffers.trail)?;

        buffers.echo.clear(Rgba8::TRANSPARENT);
        self.stamper
            .stamp(&mut buffers.echo, &self.outline, transform, cfg.echo_color)?;
        surface.draw_layer(Layer::Echo, &buffers.echo)?;

        Ok(true)
    }

    /// Drop both buffers. Later composites are no-ops until the next resize.
    pub fn release(&mut self) {
        self.buffers = None;
        self.stamper.release();
    }
}

/// Shareable handle to a [`TrailCompositor`] behind the single buffer lock.
///
/// Reallocation, compositing and configuration swaps all take the same lock, so a host resize
/// callback can never mutate a buffer while a frame is being drawn into it.
#[derive(Clone)]
pub struct TrailCanvas {
    inner: Arc<Mutex<TrailCompositor>>,
}

impl TrailCanvas {
    /// Wrap a new compositor for `config`.
    pub fn new(config: Arc<TrailConfig>) -> TrailResult<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(TrailCompositor::new(config)?)),
        })
    }

    fn lock(&self) -> TrailResult<MutexGuard<'_, TrailCompositor>> {
        self.inner
            .lock()
            .map_err(|_| TrailError::render("trail canvas lock poisoned"))
    }

    /// See [`TrailCompositor::resize`].
    pub fn resize(&self, logical: LogicalSize, scale_factor: f64) -> TrailResult<ResizeOutcome> {
        self.lock()?.resize(logical, scale_factor)
    }

    /// See [`TrailCompositor::set_config`].
    pub fn set_config(&self, next: Arc<TrailConfig>) -> TrailResult<()> {
        self.lock()?.set_config(next)
    }

    /// See [`TrailCompositor::composite`].
    pub fn composite(
        &self,
        state: &ObjectState,
        surface: &mut dyn DisplaySurface,
    ) -> TrailResult<bool> {
        self.lock()?.composite(state, surface)
    }

    /// See [`TrailCompositor::release`].
    pub fn release(&self) -> TrailResult<()> {
        self.lock()?.release();
        Ok(())
    }

    /// Run `f` with the compositor locked, e.g. to inspect buffers.
    pub fn with<R>(&self, f: impl FnOnce(&TrailCompositor) -> R) -> TrailResult<R> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
