use serde::{Deserialize, Serialize};

use crate::foundation::core::{BoundingBox, Point, Rect, Rgba8};
use crate::foundation::error::GhostResult;
use crate::render::layer::RenderLayer;
use crate::render::raster::Painter;
use crate::render::text::TextEngine;
use crate::silhouette::AnchorMap;

/// Viewfinder decoration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationStyle {
    /// Length of each bracket arm.
    pub bracket_length: f64,
    /// Distance between the silhouette bbox and the brackets.
    pub bracket_padding: f64,
    /// Bracket stroke width.
    pub bracket_width: f64,
    /// Bracket color.
    pub bracket_color: Rgba8,
    /// Half-length of a crosshair.
    pub crosshair_size: f64,
    /// Crosshair stroke width.
    pub crosshair_width: f64,
    /// Crosshair and dot color.
    pub crosshair_color: Rgba8,
    /// Radius of the dot at each anchor.
    pub dot_radius: f64,
    /// Alpha of the full-canvas center reticle.
    pub reticle_alpha: u8,
    /// Label center as a fraction of canvas height.
    pub label_y: f64,
    /// Label font size.
    pub label_size: f32,
    /// Label chip alpha.
    pub label_chip_alpha: u8,
    /// Label text alpha.
    pub label_text_alpha: u8,
    /// Instruction center as a fraction of canvas height.
    pub instruction_y: f64,
    /// Instruction font size.
    pub instruction_size: f32,
    /// Instruction chip alpha.
    pub instruction_chip_alpha: u8,
    /// Instruction text alpha.
    pub instruction_text_alpha: u8,
    /// Space between text and chip edge.
    pub chip_padding: f64,
    /// Chip corner radius.
    pub chip_radius: f64,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            bracket_length: 60.0,
            bracket_padding: 12.0,
            bracket_width: 2.0,
            bracket_color: Rgba8::new(255, 255, 255, 160),
            crosshair_size: 12.0,
            crosshair_width: 1.0,
            crosshair_color: Rgba8::new(0, 220, 120, 180),
            dot_radius: 2.0,
            reticle_alpha: 15,
            label_y: 0.10,
            label_size: 32.0,
            label_chip_alpha: 140,
            label_text_alpha: 220,
            instruction_y: 0.90,
            instruction_size: 22.0,
            instruction_chip_alpha: 120,
            instruction_text_alpha: 180,
            chip_padding: 10.0,
            chip_radius: 8.0,
        }
    }
}

/// Text drawn on a template.
#[derive(Clone, Copy, Debug)]
pub struct Captions<'a> {
    /// Viewpoint label near the top.
    pub label: &'a str,
    /// Instruction near the bottom.
    pub instruction: &'a str,
}

/// Draw the reticle, corner brackets, anchor crosshairs and caption chips over `layer`.
pub fn annotate(
    layer: &RenderLayer,
    bbox: BoundingBox,
    anchors: &AnchorMap,
    captions: Captions<'_>,
    style: &AnnotationStyle,
    text: &mut TextEngine,
) -> GhostResult<RenderLayer> {
    let (w, h) = (f64::from(layer.width()), f64::from(layer.height()));
    let mut painter = Painter::with_size(layer.width(), layer.height())?;

    draw_reticle(&mut painter, w, h, style);
    draw_brackets(&mut painter, bbox.expand(style.bracket_padding), style);
    for p in anchors.values() {
        draw_crosshair(&mut painter, *p, style);
    }

    let center_x = w * 0.5;
    draw_chip(
        &mut painter,
        text,
        captions.label,
        Point::new(center_x, h * style.label_y),
        style.label_size,
        ChipAlpha {
            chip: style.label_chip_alpha,
            text: style.label_text_alpha,
        },
        style,
    )?;
    draw_chip(
        &mut painter,
        text,
        captions.instruction,
        Point::new(center_x, h * style.instruction_y),
        style.instruction_size,
        ChipAlpha {
            chip: style.instruction_chip_alpha,
            text: style.instruction_text_alpha,
        },
        style,
    )?;

    let decorations = painter.finish()?;
    let mut out = layer.clone();
    out.composite_over(&decorations)?;
    Ok(out)
}

fn draw_reticle(painter: &mut Painter, w: f64, h: f64, style: &AnnotationStyle) {
    let color = Rgba8::WHITE.with_alpha(style.reticle_alpha);
    // Half-pixel offset keeps 1px lines on a single pixel column/row.
    let cx = (w * 0.5).floor() + 0.5;
    let cy = (h * 0.5).floor() + 0.5;
    painter.stroke_line(Point::new(cx, 0.0), Point::new(cx, h), 1.0, color);
    painter.stroke_line(Point::new(0.0, cy), Point::new(w, cy), 1.0, color);
}

/// Bracket polylines (arm end, corner, arm end) in TL, TR, BR, BL order.
pub fn bracket_arms(frame: BoundingBox, length: f64) -> [[Point; 3]; 4] {
    let BoundingBox { x1, y1, x2, y2 } = frame;
    [
        [
            Point::new(x1 + length, y1),
            Point::new(x1, y1),
            Point::new(x1, y1 + length),
        ],
        [
            Point::new(x2 - length, y1),
            Point::new(x2, y1),
            Point::new(x2, y1 + length),
        ],
        [
            Point::new(x2 - length, y2),
            Point::new(x2, y2),
            Point::new(x2, y2 - length),
        ],
        [
            Point::new(x1 + length, y2),
            Point::new(x1, y2),
            Point::new(x1, y2 - length),
        ],
    ]
}

fn draw_brackets(painter: &mut Painter, frame: BoundingBox, style: &AnnotationStyle) {
    for arm in bracket_arms(frame, style.bracket_length) {
        painter.stroke_polyline(&arm, false, style.bracket_width, style.bracket_color);
    }
}

fn draw_crosshair(painter: &mut Painter, c: Point, style: &AnnotationStyle) {
    let size = style.crosshair_size;
    let gap = size / 3.0;
    let color = style.crosshair_color;
    let width = style.crosshair_width;
    for (dx, dy) in [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)] {
        painter.stroke_line(
            Point::new(c.x + dx * gap, c.y + dy * gap),
            Point::new(c.x + dx * size, c.y + dy * size),
            width,
            color,
        );
    }
    painter.fill_circle(c, style.dot_radius, color);
}

#[derive(Clone, Copy)]
struct ChipAlpha {
    chip: u8,
    text: u8,
}

fn draw_chip(
    painter: &mut Painter,
    text: &mut TextEngine,
    caption: &str,
    center: Point,
    size: f32,
    alpha: ChipAlpha,
    style: &AnnotationStyle,
) -> GhostResult<()> {
    if caption.trim().is_empty() {
        return Ok(());
    }
    let block = text.layout(caption, size, Rgba8::WHITE.with_alpha(alpha.text))?;
    let (tw, th) = (f64::from(block.width()), f64::from(block.height()));
    let origin = Point::new(center.x - tw * 0.5, center.y - th * 0.5);
    let pad = style.chip_padding;
    let chip = Rect::new(
        origin.x - pad,
        origin.y - pad,
        origin.x + tw + pad,
        origin.y + th + pad,
    );
    painter.fill_rounded_rect(chip, style.chip_radius, Rgba8::BLACK.with_alpha(alpha.chip));
    text.draw(painter, &block, origin);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/annotate.rs"]
mod tests;
