//! Vector drawing onto a transparent canvas via `vello_cpu`.

use vello_cpu::kurbo::{self as cpu_kurbo, Shape};

use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{GhostError, GhostResult};
use crate::render::layer::RenderLayer;

const PATH_TOLERANCE: f64 = 0.1;

/// Anti-aliased painter over a transparent RGBA canvas.
///
/// Draw calls composite source-over in call order; [`Painter::finish`] resolves them into a
/// straight-alpha [`RenderLayer`].
pub struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Painter {
    /// Painter covering `canvas`.
    pub fn new(canvas: Canvas) -> GhostResult<Self> {
        Self::with_size(canvas.width, canvas.height)
    }

    /// Painter covering `width` x `height` pixels.
    pub fn with_size(width: u32, height: u32) -> GhostResult<Self> {
        let w = u16::try_from(width)
            .map_err(|_| GhostError::render(format!("raster width {width} exceeds u16")))?;
        let h = u16::try_from(height)
            .map_err(|_| GhostError::render(format!("raster height {height} exceeds u16")))?;
        if w == 0 || h == 0 {
            return Err(GhostError::render("raster dimensions must be > 0"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
        })
    }

    /// Stroke a polyline with round joins and caps. Fewer than two points draw nothing.
    pub fn stroke_polyline(&mut self, points: &[Point], closed: bool, width: f64, color: Rgba8) {
        let Some(path) = polyline_path(points, closed) else {
            return;
        };
        self.stroke(&path, width, color);
    }

    /// Fill the polygon through `points` (non-zero winding).
    pub fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        let Some(path) = polyline_path(points, true) else {
            return;
        };
        self.fill(&path, color);
    }

    /// Stroke the segment `a`-`b`.
    pub fn stroke_line(&mut self, a: Point, b: Point, width: f64, color: Rgba8) {
        self.stroke_polyline(&[a, b], false, width, color);
    }

    /// Stroke an axis-aligned ellipse.
    pub fn stroke_ellipse(&mut self, center: Point, rx: f64, ry: f64, width: f64, color: Rgba8) {
        let ellipse = cpu_kurbo::Ellipse::new(cpu_point(center), (rx, ry), 0.0);
        self.stroke(&ellipse.to_path(PATH_TOLERANCE), width, color);
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        let circle = cpu_kurbo::Circle::new(cpu_point(center), radius);
        self.fill(&circle.to_path(PATH_TOLERANCE), color);
    }

    /// Fill a rounded rectangle.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgba8) {
        let rr = cpu_kurbo::RoundedRect::new(rect.x0, rect.y0, rect.x1, rect.y1, radius);
        self.fill(&rr.to_path(PATH_TOLERANCE), color);
    }

    /// Direct access for glyph drawing.
    pub(crate) fn context(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Rasterize every queued draw into a straight-alpha layer.
    pub fn finish(mut self) -> GhostResult<RenderLayer> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        RenderLayer::from_premul(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }

    fn stroke(&mut self, path: &cpu_kurbo::BezPath, width: f64, color: Rgba8) {
        if color.a == 0 || width <= 0.0 {
            return;
        }
        self.ctx.set_transform(cpu_kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint(color));
        self.ctx.set_stroke(
            cpu_kurbo::Stroke::new(width)
                .with_join(cpu_kurbo::Join::Round)
                .with_caps(cpu_kurbo::Cap::Round),
        );
        self.ctx.stroke_path(path);
    }

    fn fill(&mut self, path: &cpu_kurbo::BezPath, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        self.ctx.set_transform(cpu_kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint(color));
        self.ctx.fill_path(path);
    }
}

pub(crate) fn paint(color: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn cpu_point(p: Point) -> cpu_kurbo::Point {
    cpu_kurbo::Point::new(p.x, p.y)
}

fn polyline_path(points: &[Point], closed: bool) -> Option<cpu_kurbo::BezPath> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut path = cpu_kurbo::BezPath::new();
    path.move_to(cpu_point(*first));
    for p in rest {
        path.line_to(cpu_point(*p));
    }
    if closed {
        path.close_path();
    }
    Some(path)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
