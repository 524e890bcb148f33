//! Placing a rendered outline on the output canvas: resize, mirror, perspective skew, paste.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{BoundingBox, Canvas, Point};
use crate::foundation::error::{GhostError, GhostResult};
use crate::foundation::math::unpremultiply_in_place;
use crate::geometry::perspective::{Homography, PerspectiveSolver};
use crate::render::layer::RenderLayer;

/// Largest accepted skew magnitude; beyond it the squeezed edge collapses.
pub const MAX_SKEW: f64 = 3.0;

/// Where and how a layer lands on the output canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Placement {
    /// Width of the placed layer as a fraction of canvas width. Aspect ratio is kept.
    pub width_fraction: f64,
    /// Shift from the centered position, as `[fraction of width, fraction of height]`.
    pub offset: [f64; 2],
    /// Mirror horizontally after resizing.
    pub flip: bool,
    /// Perspective skew (see [`crate::geometry::perspective::skew_quad`]).
    pub skew: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            width_fraction: 1.0,
            offset: [0.0, 0.0],
            flip: false,
            skew: 0.0,
        }
    }
}

impl Placement {
    /// Reject non-finite values, non-positive widths and collapsing skews.
    pub fn validate(&self) -> GhostResult<()> {
        if !(self.width_fraction.is_finite() && self.width_fraction > 0.0) {
            return Err(GhostError::validation(
                "placement width_fraction must be finite and > 0",
            ));
        }
        if !self.offset.iter().all(|v| v.is_finite()) {
            return Err(GhostError::validation("placement offset must be finite"));
        }
        if !(self.skew.is_finite() && self.skew.abs() <= MAX_SKEW) {
            return Err(GhostError::validation(format!(
                "placement skew must be within [-{MAX_SKEW}, {MAX_SKEW}]"
            )));
        }
        Ok(())
    }
}

/// Maps points of the source layer onto the output canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementMap {
    scale_x: f64,
    scale_y: f64,
    width: u32,
    height: u32,
    flip: bool,
    homography: Homography,
    origin: (i64, i64),
}

impl PlacementMap {
    /// Canvas position of source point `p`.
    pub fn map_point(&self, p: Point) -> Point {
        let mut q = Point::new(p.x * self.scale_x, p.y * self.scale_y);
        if self.flip {
            q.x = f64::from(self.width) - q.x;
        }
        let q = self.homography.apply(q);
        Point::new(q.x + self.origin.0 as f64, q.y + self.origin.1 as f64)
    }

    /// Box enclosing the mapped corners of `bbox`.
    pub fn map_bbox(&self, bbox: BoundingBox) -> BoundingBox {
        bbox.map_corners(|p| self.map_point(p))
    }

    /// Rectangle the resized layer was pasted into.
    pub fn paste_rect(&self) -> BoundingBox {
        let (x, y) = (self.origin.0 as f64, self.origin.1 as f64);
        BoundingBox::new(x, y, x + f64::from(self.width), y + f64::from(self.height))
    }

    /// Size of the resized layer.
    pub fn placed_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Work out where a `src_w` x `src_h` layer lands on `canvas` without touching any pixels.
pub fn plan(
    src_w: u32,
    src_h: u32,
    canvas: Canvas,
    placement: &Placement,
) -> GhostResult<PlacementMap> {
    placement.validate()?;
    if src_w == 0 || src_h == 0 {
        return Err(GhostError::validation("cannot place an empty layer"));
    }

    let scale = placement.width_fraction * canvas.w() / f64::from(src_w);
    let new_w = scaled_dim(src_w, scale)?;
    let new_h = scaled_dim(src_h, scale)?;

    let homography = PerspectiveSolver::for_skew(
        f64::from(new_w),
        f64::from(new_h),
        placement.skew,
    )?;

    let origin = (
        (i64::from(canvas.width) - i64::from(new_w)).div_euclid(2)
            + (placement.offset[0] * canvas.w()).trunc() as i64,
        (i64::from(canvas.height) - i64::from(new_h)).div_euclid(2)
            + (placement.offset[1] * canvas.h()).trunc() as i64,
    );

    Ok(PlacementMap {
        scale_x: f64::from(new_w) / f64::from(src_w),
        scale_y: f64::from(new_h) / f64::from(src_h),
        width: new_w,
        height: new_h,
        flip: placement.flip,
        homography,
        origin,
    })
}

/// Transform `layers` (all the same size) identically and composite them, in order, onto a
/// transparent `canvas`.
pub fn place(
    layers: &[&RenderLayer],
    canvas: Canvas,
    placement: &Placement,
) -> GhostResult<(RenderLayer, PlacementMap)> {
    let Some(first) = layers.first() else {
        return Err(GhostError::validation("place needs at least one layer"));
    };
    let (src_w, src_h) = (first.width(), first.height());
    if layers
        .iter()
        .any(|l| l.width() != src_w || l.height() != src_h)
    {
        return Err(GhostError::validation("placed layers must share dimensions"));
    }

    let map = plan(src_w, src_h, canvas, placement)?;
    let (new_w, new_h) = map.placed_size();
    let inverse = map.homography.inverse()?;

    let mut out = RenderLayer::for_canvas(canvas);
    for layer in layers {
        let img = image::RgbaImage::from_raw(src_w, src_h, layer.to_premul())
            .ok_or_else(|| GhostError::render("layer bytes do not match its dimensions"))?;

        let mut img = if (new_w, new_h) == (src_w, src_h) {
            img
        } else {
            image::imageops::resize(&img, new_w, new_h, image::imageops::FilterType::Lanczos3)
        };
        if placement.flip {
            img = image::imageops::flip_horizontal(&img);
        }

        let mut bytes = img.into_raw();
        if !map.homography.is_identity() {
            bytes = warp_premul(&bytes, new_w, new_h, &inverse);
        }
        clamp_premul(&mut bytes);
        unpremultiply_in_place(&mut bytes);
        let placed = RenderLayer::from_straight(new_w, new_h, bytes)?;
        paste_over(&mut out, &placed, map.origin);
    }

    Ok((out, map))
}

fn scaled_dim(src: u32, scale: f64) -> GhostResult<u32> {
    let v = (f64::from(src) * scale).floor();
    if !v.is_finite() || v > f64::from(u16::MAX) {
        return Err(GhostError::validation(format!(
            "placement scales {src}px to {v}px, beyond {}",
            u16::MAX
        )));
    }
    Ok((v as u32).max(1))
}

/// Bicubic (Keys, a = -0.5) perspective resampling of premultiplied RGBA8.
///
/// Output pixels whose source position falls outside the source are transparent.
fn warp_premul(src: &[u8], w: u32, h: u32, inverse: &Homography) -> Vec<u8> {
    let (wf, hf) = (f64::from(w), f64::from(h));
    let mut out = vec![0u8; src.len()];
    for y in 0..h {
        for x in 0..w {
            let s = inverse.apply(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5));
            if !(s.x.is_finite() && s.y.is_finite())
                || s.x < 0.0
                || s.y < 0.0
                || s.x > wf
                || s.y > hf
            {
                continue;
            }
            let px = sample_bicubic(src, w, h, s.x - 0.5, s.y - 0.5);
            let i = ((y as usize) * (w as usize) + (x as usize)) * 4;
            out[i..i + 4].copy_from_slice(&px);
        }
    }
    out
}

fn keys_weight(t: f64) -> f64 {
    const A: f64 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        (A + 2.0) * t * t * t - (A + 3.0) * t * t + 1.0
    } else if t < 2.0 {
        A * t * t * t - 5.0 * A * t * t + 8.0 * A * t - 4.0 * A
    } else {
        0.0
    }
}

fn sample_bicubic(src: &[u8], w: u32, h: u32, fx: f64, fy: f64) -> [u8; 4] {
    let x0 = fx.floor() as i64;
    let y0 = fy.floor() as i64;
    let (max_x, max_y) = (i64::from(w) - 1, i64::from(h) - 1);

    let mut acc = [0.0f64; 4];
    for m in -1..=2 {
        let sy = (y0 + m).clamp(0, max_y);
        let wy = keys_weight(fy - (y0 + m) as f64);
        if wy == 0.0 {
            continue;
        }
        for n in -1..=2 {
            let sx = (x0 + n).clamp(0, max_x);
            let wgt = wy * keys_weight(fx - (x0 + n) as f64);
            if wgt == 0.0 {
                continue;
            }
            let i = ((sy as usize) * (w as usize) + (sx as usize)) * 4;
            for (c, a) in acc.iter_mut().enumerate() {
                *a += wgt * f64::from(src[i + c]);
            }
        }
    }
    acc.map(|v| v.round().clamp(0.0, 255.0) as u8)
}

/// Keep premultiplied color channels at or below alpha after ringing filters.
fn clamp_premul(bytes: &mut [u8]) {
    for px in bytes.chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = (*c).min(a);
        }
    }
}

fn paste_over(dst: &mut RenderLayer, src: &RenderLayer, origin: (i64, i64)) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    for y in 0..src.height() {
        let ty = origin.1 + i64::from(y);
        if !(0..dh).contains(&ty) {
            continue;
        }
        for x in 0..src.width() {
            let tx = origin.0 + i64::from(x);
            if !(0..dw).contains(&tx) {
                continue;
            }
            let Some(s) = src.pixel(x, y) else { continue };
            if s[3] == 0 {
                continue;
            }
            let (tx, ty) = (tx as u32, ty as u32);
            let d = dst.pixel(tx, ty).unwrap_or([0; 4]);
            dst.set_pixel(tx, ty, crate::effects::composite::over_straight(d, s));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/place.rs"]
mod tests;
