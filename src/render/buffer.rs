use crate::foundation::core::{PhysicalSize, Rgba8};
use crate::foundation::error::{TrailError, TrailResult};
use crate::render::composite::clear;

/// Persistent premultiplied RGBA8 raster backed by a `vello_cpu` pixmap.
pub struct RasterBuffer {
    pixmap: vello_cpu::Pixmap,
}

impl RasterBuffer {
    /// Allocate a buffer of `size` physical pixels, cleared to `color`.
    pub fn new(size: PhysicalSize, color: Rgba8) -> TrailResult<Self> {
        if size.is_empty() {
            return Err(TrailError::validation(format!(
                "raster buffer needs a non-empty size, got {}x{}",
                size.width, size.height
            )));
        }
        let mut out = Self {
            pixmap: vello_cpu::Pixmap::new(size.width, size.height),
        };
        out.clear(color);
        Ok(out)
    }

    /// Size in physical pixels.
    pub fn size(&self) -> PhysicalSize {
        PhysicalSize::new(self.pixmap.width(), self.pixmap.height())
    }

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: Rgba8) {
        clear(self.pixmap.data_as_u8_slice_mut(), color.to_premul());
    }

    /// Tightly packed, row-major premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Mutable access to the pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 4]> {
        let size = self.size();
        if x >= size.width || y >= size.height {
            return None;
        }
        let idx = (usize::from(y) * usize::from(size.width) + usize::from(x)) * 4;
        let d = self.data();
        Some([d[idx], d[idx + 1], d[idx + 2], d[idx + 3]])
    }
}

impl std::fmt::Debug for RasterBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.size();
        f.debug_struct("RasterBuffer")
            .field("width", &size.width)
            .field("height", &size.height)
            .finish()
    }
}

/// The two buffers owned by the compositor. Always the same size.
#[derive(Debug)]
pub(crate) struct BufferPair {
    pub(crate) trail: RasterBuffer,
    pub(crate) echo: RasterBuffer,
}

impl BufferPair {
    pub(crate) fn new(size: PhysicalSize, background: Rgba8) -> TrailResult<Self> {
        Ok(Self {
            trail: RasterBuffer::new(size, background)?,
            echo: RasterBuffer::new(size, background)?,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize {
        self.trail.size()
    }
}
