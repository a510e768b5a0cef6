use crate::foundation::core::{LogicalSize, PhysicalSize};
use crate::foundation::error::{TrailError, TrailResult};
use crate::render::buffer::RasterBuffer;
use crate::render::composite::over_in_place;

/// Which compositor buffer is being presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Persistent, fading history.
    Trail,
    /// Most recent stamp only.
    Echo,
}

/// Host display surface the compositor presents into.
///
/// The host owns the surface lifecycle; the compositor only reads its geometry and draws
/// layers into it, trail first, then echo on top.
pub trait DisplaySurface {
    /// Current size in logical units.
    fn logical_size(&self) -> LogicalSize;

    /// Device pixels per logical unit.
    fn scale_factor(&self) -> f64;

    /// Called once per presented frame before any layer is drawn.
    fn begin_frame(&mut self, _size: PhysicalSize) -> TrailResult<()> {
        Ok(())
    }

    /// Composite `buffer` source-over onto the surface at the origin.
    fn draw_layer(&mut self, layer: Layer, buffer: &RasterBuffer) -> TrailResult<()>;
}

/// A presented frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    fn transparent(size: PhysicalSize) -> Self {
        Self {
            width: u32::from(size.width),
            height: u32::from(size.height),
            data: vec![0; size.byte_len()],
            premultiplied: true,
        }
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// In-memory display surface for headless hosts and tests.
#[derive(Clone, Debug)]
pub struct FrameSurface {
    logical: LogicalSize,
    scale_factor: f64,
    frame: FrameRGBA,
    layers_drawn: u32,
}

impl FrameSurface {
    /// Surface of `logical` units at `scale_factor` device pixels per unit.
    pub fn new(logical: LogicalSize, scale_factor: f64) -> TrailResult<Self> {
        let size = logical.to_physical(scale_factor)?;
        Ok(Self {
            logical,
            scale_factor,
            frame: FrameRGBA::transparent(size),
            layers_drawn: 0,
        })
    }

    /// Change the surface geometry, as a host window resize would.
    pub fn resize(&mut self, logical: LogicalSize, scale_factor: f64) -> TrailResult<()> {
        let size = logical.to_physical(scale_factor)?;
        self.logical = logical;
        self.scale_factor = scale_factor;
        self.frame = FrameRGBA::transparent(size);
        Ok(())
    }

    /// Last presented frame.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    /// Layers drawn since the last `begin_frame`.
    pub fn layers_drawn(&self) -> u32 {
        self.layers_drawn
    }
}

impl DisplaySurface for FrameSurface {
    fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn begin_frame(&mut self, size: PhysicalSize) -> TrailResult<()> {
        let w = u32::from(size.width);
        let h = u32::from(size.height);
        if self.frame.width != w || self.frame.height != h {
            self.frame = FrameRGBA::transparent(size);
        } else {
            self.frame.data.fill(0);
        }
        self.layers_drawn = 0;
        Ok(())
    }

    fn draw_layer(&mut self, _layer: Layer, buffer: &RasterBuffer) -> TrailResult<()> {
        let size = buffer.size();
        if self.frame.width != u32::from(size.width) || self.frame.height != u32::from(size.height)
        {
            return Err(TrailError::render(format!(
                "layer is {}x{} but the surface frame is {}x{}",
                size.width, size.height, self.frame.width, self.frame.height
            )));
        }
        over_in_place(&mut self.frame.data, buffer.data())?;
        self.layers_drawn += 1;
        Ok(())
    }
}
