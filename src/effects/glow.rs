use serde::{Deserialize, Serialize};

use crate::effects::blur::blur_channel;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{GhostError, GhostResult};
use crate::render::layer::RenderLayer;
use crate::render::raster::Painter;
use crate::silhouette::WheelSpec;

/// Crisp stroke widths and alphas per polyline role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrokeStyle {
    /// Line color; its alpha is replaced by the per-role alphas below.
    pub color: Rgba8,
    /// Body outline width.
    pub width: f64,
    /// Body outline alpha.
    pub body_alpha: u8,
    /// Window width.
    pub window_width: f64,
    /// Window alpha.
    pub window_alpha: u8,
    /// Detail width.
    pub detail_width: f64,
    /// Detail alpha.
    pub detail_alpha: u8,
    /// Wheel rim width.
    pub wheel_width: f64,
    /// Wheel rim alpha.
    pub wheel_alpha: u8,
    /// Hub ring alpha.
    pub hub_alpha: u8,
    /// Spoke alpha.
    pub spoke_alpha: u8,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::WHITE,
            width: 2.0,
            body_alpha: 200,
            window_width: 1.0,
            window_alpha: 120,
            detail_width: 1.0,
            detail_alpha: 140,
            wheel_width: 2.0,
            wheel_alpha: 180,
            hub_alpha: 100,
            spoke_alpha: 70,
        }
    }
}

/// Soft blur halo written around a raster outline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmbientGlow {
    /// Blur radius; the kernel spans `2 * radius` pixels each way with sigma `2 * radius`.
    pub radius: u32,
    /// Multiplier applied to the blurred alpha.
    pub intensity: f32,
    /// Tint. Only RGB is used.
    pub color: Rgba8,
}

impl Default for AmbientGlow {
    fn default() -> Self {
        Self {
            radius: 4,
            intensity: 0.4,
            color: Rgba8::rgb(100, 200, 255),
        }
    }
}

/// Multi-pass glow and haze parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlowStyle {
    /// Glow tint. Only RGB is used.
    pub color: Rgba8,
    /// Number of glow passes per body outline.
    pub passes: u32,
    /// Alpha of the innermost pass, in `[0, 1]`.
    pub base_alpha: f32,
    /// Width added per pass.
    pub width_step: f64,
    /// Alpha of the white body fill.
    pub haze_alpha: u8,
    /// Halo for raster outlines.
    pub ambient: AmbientGlow,
}

impl Default for GlowStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::rgb(100, 180, 255),
            passes: 4,
            base_alpha: 0.25,
            width_step: 3.0,
            haze_alpha: 20,
            ambient: AmbientGlow::default(),
        }
    }
}

/// One glow stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowPass {
    /// Stroke width in pixels.
    pub width: f64,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

/// Glow passes for a stroke of `stroke_width`, innermost first.
///
/// Pass `i` of `N` is `stroke_width + (i + 1) * width_step` wide with opacity
/// `base_alpha * (1 - i / N)`.
pub fn glow_schedule(stroke_width: f64, style: &GlowStyle) -> Vec<GlowPass> {
    let n = style.passes;
    (0..n)
        .map(|i| GlowPass {
            width: stroke_width + f64::from(i + 1) * style.width_step,
            alpha: style.base_alpha * (1.0 - i as f32 / n as f32),
        })
        .collect()
}

/// Smoothed polylines and wheels ready to rasterize.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RasterInput {
    /// Body outlines.
    pub outlines: Vec<Vec<Point>>,
    /// Windows.
    pub windows: Vec<Vec<Point>>,
    /// Details.
    pub details: Vec<Vec<Point>>,
    /// Wheels.
    pub wheels: Vec<WheelSpec>,
}

impl RasterInput {
    /// Every polyline point, followed by every wheel's axis-aligned extremes.
    pub fn extent_points(&self) -> Vec<Point> {
        let mut out: Vec<Point> = self
            .outlines
            .iter()
            .chain(self.windows.iter())
            .chain(self.details.iter())
            .flatten()
            .copied()
            .collect();
        for w in &self.wheels {
            out.extend(w.bounds().corners());
        }
        out
    }
}

/// Rasterize a vector silhouette: haze, glow, crisp strokes, then wheels.
pub fn render(
    input: &RasterInput,
    canvas: Canvas,
    stroke: &StrokeStyle,
    glow: &GlowStyle,
) -> GhostResult<RenderLayer> {
    let mut painter = Painter::new(canvas)?;

    let haze: Vec<Point> = input.outlines.iter().flatten().copied().collect();
    painter.fill_polygon(&haze, Rgba8::WHITE.with_alpha(glow.haze_alpha));

    let tint = glow.color.with_alpha(255);
    let passes = glow_schedule(stroke.width, glow);
    for outline in &input.outlines {
        for pass in passes.iter().rev() {
            painter.stroke_polyline(outline, false, pass.width, tint.scale_alpha(pass.alpha));
        }
    }

    let body = stroke.color.with_alpha(stroke.body_alpha);
    for outline in &input.outlines {
        painter.stroke_polyline(outline, false, stroke.width, body);
    }
    let window = stroke.color.with_alpha(stroke.window_alpha);
    for w in &input.windows {
        painter.stroke_polyline(w, false, stroke.window_width, window);
    }
    let detail = stroke.color.with_alpha(stroke.detail_alpha);
    for d in &input.details {
        painter.stroke_polyline(d, false, stroke.detail_width, detail);
    }

    for wheel in &input.wheels {
        draw_wheel(&mut painter, wheel, stroke);
    }

    painter.finish()
}

fn draw_wheel(painter: &mut Painter, wheel: &WheelSpec, stroke: &StrokeStyle) {
    let c = wheel.center;
    painter.stroke_ellipse(
        c,
        wheel.rx,
        wheel.ry,
        stroke.wheel_width,
        stroke.color.with_alpha(stroke.wheel_alpha),
    );
    painter.stroke_ellipse(
        c,
        wheel.rx / 3.0,
        wheel.ry / 3.0,
        1.0,
        stroke.color.with_alpha(stroke.hub_alpha),
    );

    let spoke = stroke.color.with_alpha(stroke.spoke_alpha);
    for k in 0..5 {
        let angle = f64::from(k * 72).to_radians();
        let (s, co) = angle.sin_cos();
        let at = |f: f64| Point::new(c.x + wheel.rx * f * co, c.y + wheel.ry * f * s);
        painter.stroke_line(at(1.0 / 3.0), at(0.85), 1.0, spoke);
    }
}

/// Tinted halo from the blurred alpha of `layer`, written only into fully transparent pixels.
pub fn ambient_glow(layer: &RenderLayer, glow: &AmbientGlow) -> GhostResult<RenderLayer> {
    if !(glow.intensity.is_finite() && glow.intensity >= 0.0) {
        return Err(GhostError::validation("ambient glow intensity must be >= 0"));
    }
    let (w, h) = (layer.width(), layer.height());
    let alpha = layer.alpha();
    let spread = 2 * glow.radius;
    let blurred = blur_channel(&alpha, w, h, spread, spread.max(1) as f32)?;

    let mut out = layer.clone();
    let [r, g, b, _] = glow.color.to_array();
    for (i, px) in out.data_mut().chunks_exact_mut(4).enumerate() {
        if alpha[i] != 0 {
            continue;
        }
        let a = (f32::from(blurred[i]) * glow.intensity).clamp(0.0, 255.0) as u8;
        if a != 0 {
            px.copy_from_slice(&[r, g, b, a]);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glow.rs"]
mod tests;
