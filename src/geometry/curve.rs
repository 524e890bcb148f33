//! Catmull-Rom smoothing of hand-authored control polylines.
//!
//! Uniform parameterization (tangent weight 0.5) is used for every curve so that polylines
//! sharing a vertex meet without a visible kink.

use crate::foundation::core::Point;
use crate::silhouette::ControlPolyline;

/// Samples emitted per control segment when no density is configured.
pub const DEFAULT_SAMPLES_PER_SEGMENT: usize = 30;

/// Turns control polylines into dense smooth polylines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveSmoother {
    samples_per_segment: usize,
}

impl Default for CurveSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES_PER_SEGMENT)
    }
}

impl CurveSmoother {
    /// Smoother emitting `samples_per_segment` points per segment (at least one).
    pub fn new(samples_per_segment: usize) -> Self {
        Self {
            samples_per_segment: samples_per_segment.max(1),
        }
    }

    /// Configured density.
    pub fn samples_per_segment(&self) -> usize {
        self.samples_per_segment
    }

    /// Smooth an authored polyline, honoring its `smooth` and `closed` flags.
    pub fn smooth_polyline(&self, poly: &ControlPolyline) -> Vec<Point> {
        if poly.smooth {
            return self.smooth(&poly.points, poly.closed);
        }
        let mut out = poly.points.clone();
        if poly.closed
            && let (Some(&first), Some(&last)) = (out.first(), out.last())
            && first != last
        {
            out.push(first);
        }
        out
    }

    /// Interpolate a smooth curve through every control point.
    ///
    /// Fewer than three points are returned unchanged.
    pub fn smooth(&self, points: &[Point], closed: bool) -> Vec<Point> {
        if points.len() < 3 {
            return points.to_vec();
        }
        if closed {
            self.smooth_closed(points)
        } else {
            self.smooth_open(points)
        }
    }

    fn smooth_open(&self, points: &[Point]) -> Vec<Point> {
        let n = points.len();
        let at = |i: isize| -> Point { points[i.clamp(0, n as isize - 1) as usize] };

        let mut out = Vec::with_capacity((n - 1) * self.samples_per_segment + 1);
        for seg in 0..(n - 1) as isize {
            let (p0, p1, p2, p3) = (at(seg - 1), at(seg), at(seg + 1), at(seg + 2));
            self.push_segment(&mut out, p0, p1, p2, p3);
        }
        out.push(points[n - 1]);
        out
    }

    fn smooth_closed(&self, points: &[Point]) -> Vec<Point> {
        let n = points.len();
        let at = |i: usize| -> Point { points[i % n] };

        let mut out = Vec::with_capacity(n * self.samples_per_segment + 1);
        for seg in 0..n {
            let (p0, p1, p2, p3) = (at(seg + n - 1), at(seg), at(seg + 1), at(seg + 2));
            self.push_segment(&mut out, p0, p1, p2, p3);
        }
        out.push(points[0]);
        out
    }

    fn push_segment(&self, out: &mut Vec<Point>, p0: Point, p1: Point, p2: Point, p3: Point) {
        let steps = self.samples_per_segment;
        for k in 0..steps {
            let t = k as f64 / steps as f64;
            out.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
}

/// Evaluate one uniform Catmull-Rom segment between `p1` and `p2` at `t` in `[0, 1]`.
pub fn catmull_rom(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let blend = |a: f64, b: f64, c: f64, d: f64| -> f64 {
        0.5 * ((2.0 * b)
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    Point::new(
        blend(p0.x, p1.x, p2.x, p3.x),
        blend(p0.y, p1.y, p2.y, p3.y),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/curve.rs"]
mod tests;
