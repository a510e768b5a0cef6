use crate::foundation::core::{Affine, BezPath, Point, Rgba8};
use crate::foundation::error::TrailResult;
use crate::render::buffer::RasterBuffer;
use crate::render::composite::over_in_place;

/// Fills outlines into persistent buffers.
///
/// `vello_cpu` renders into a fresh target, so each stamp is rasterized into a scratch pixmap
/// and then blended source-over onto the buffer. The render context and scratch pixmap are
/// reused across frames while the size stays the same.
#[derive(Default)]
pub(crate) struct Stamper {
    ctx: Option<vello_cpu::RenderContext>,
    scratch: Option<vello_cpu::Pixmap>,
}

impl Stamper {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fill `outline` under `transform` with `color`, anti-aliased, onto `target`.
    pub(crate) fn stamp(
        &mut self,
        target: &mut RasterBuffer,
        outline: &BezPath,
        transform: Affine,
        color: Rgba8,
    ) -> TrailResult<()> {
        let size = target.size();
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == size.width && ctx.height() == size.height => ctx,
            _ => vello_cpu::RenderContext::new(size.width, size.height),
        };
        let mut scratch = match self.scratch.take() {
            Some(p) if p.width() == size.width && p.height() == size.height => p,
            _ => vello_cpu::Pixmap::new(size.width, size.height),
        };
        scratch.data_as_u8_slice_mut().fill(0);

        ctx.reset();
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        ctx.fill_path(&bezpath_to_cpu(outline));
        ctx.flush();
        ctx.render_to_pixmap(&mut scratch);

        let out = over_in_place(target.data_mut(), scratch.data_as_u8_slice());
        self.ctx = Some(ctx);
        self.scratch = Some(scratch);
        out
    }

    /// Drop cached state, e.g. when buffers are released.
    pub(crate) fn release(&mut self) {
        self.ctx = None;
        self.scratch = None;
    }

    #[cfg(test)]
    pub(crate) fn cached_size(&self) -> Option<crate::foundation::core::PhysicalSize> {
        self.scratch
            .as_ref()
            .map(|p| crate::foundation::core::PhysicalSize::new(p.width(), p.height()))
    }
}

/// Stamp transform: place at `position * scale`, then rotate by `heading`.
///
/// The outline itself is drawn in device pixels, unscaled.
pub(crate) fn stamp_transform(position: Point, heading: f64, scale_factor: f64) -> Affine {
    Affine::translate((position.x * scale_factor, position.y * scale_factor))
        * Affine::rotate(heading)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/stamp.rs"]
mod tests;
