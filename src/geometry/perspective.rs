//! Four-point homographies for the perspective skew applied when placing an outline.

use nalgebra::{Matrix3, SMatrix, SVector};

use crate::foundation::core::Point;
use crate::foundation::error::{GhostError, GhostResult};

/// Fraction of the image height by which a full-strength skew squeezes one vertical edge.
pub const SKEW_SQUEEZE: f64 = 0.15;

const COLINEAR_EPS: f64 = 1e-9;

/// Projective transform `(x, y) -> ((ax + by + c) / (gx + hy + 1), (dx + ey + f) / (gx + hy + 1))`.
///
/// Coefficients are stored as `[a, b, c, d, e, f, g, h]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    /// Eight free coefficients; the ninth is fixed at 1.
    pub coeffs: [f64; 8],
}

impl Homography {
    /// Identity transform.
    pub const IDENTITY: Homography = Homography {
        coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
    };

    /// Map `p` through the transform. Points on the vanishing line map to non-finite coordinates.
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f, g, h] = self.coeffs;
        let w = g * p.x + h * p.y + 1.0;
        Point::new((a * p.x + b * p.y + c) / w, (d * p.x + e * p.y + f) / w)
    }

    /// Inverse transform.
    pub fn inverse(&self) -> GhostResult<Homography> {
        let inv = self
            .to_matrix()
            .try_inverse()
            .ok_or_else(|| GhostError::degenerate("homography is not invertible"))?;
        let norm = inv[(2, 2)];
        if norm.abs() < COLINEAR_EPS || !norm.is_finite() {
            return Err(GhostError::degenerate(
                "inverse homography cannot be normalized",
            ));
        }
        let m = inv / norm;
        Ok(Homography {
            coeffs: [
                m[(0, 0)],
                m[(0, 1)],
                m[(0, 2)],
                m[(1, 0)],
                m[(1, 1)],
                m[(1, 2)],
                m[(2, 0)],
                m[(2, 1)],
            ],
        })
    }

    /// `true` when every coefficient is within `1e-12` of the identity.
    pub fn is_identity(&self) -> bool {
        self.coeffs
            .iter()
            .zip(Self::IDENTITY.coeffs.iter())
            .all(|(a, b)| (a - b).abs() < 1e-12)
    }

    fn to_matrix(self) -> Matrix3<f64> {
        let [a, b, c, d, e, f, g, h] = self.coeffs;
        Matrix3::new(a, b, c, d, e, f, g, h, 1.0)
    }
}

/// Corners of a `w` x `h` image after a horizontal skew, in TL, TR, BR, BL order.
///
/// Positive skew pulls the right edge's corners toward the vertical center by
/// `|skew| * 0.15 * h`; negative skew does the same to the left edge.
pub fn skew_quad(w: f64, h: f64, skew: f64) -> [Point; 4] {
    let squeeze = skew.abs() * SKEW_SQUEEZE * h;
    let mut quad = rect_corners(w, h);
    if skew > 0.0 {
        quad[1].y = squeeze;
        quad[2].y = h - squeeze;
    } else if skew < 0.0 {
        quad[0].y = squeeze;
        quad[3].y = h - squeeze;
    }
    quad
}

/// Corners of the `w` x `h` rectangle anchored at the origin, in TL, TR, BR, BL order.
pub fn rect_corners(w: f64, h: f64) -> [Point; 4] {
    [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ]
}

/// Solves four-point correspondences into a [`Homography`].
pub struct PerspectiveSolver;

impl PerspectiveSolver {
    /// Homography taking `src[i]` to `dst[i]` for all four correspondences.
    pub fn solve(src: &[Point; 4], dst: &[Point; 4]) -> GhostResult<Homography> {
        reject_colinear(src, "source")?;
        reject_colinear(dst, "destination")?;

        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            let r = 2 * i;
            let row_x = [s.x, s.y, 1.0, 0.0, 0.0, 0.0, -d.x * s.x, -d.x * s.y];
            let row_y = [0.0, 0.0, 0.0, s.x, s.y, 1.0, -d.y * s.x, -d.y * s.y];
            for c in 0..8 {
                a[(r, c)] = row_x[c];
                a[(r + 1, c)] = row_y[c];
            }
            b[r] = d.x;
            b[r + 1] = d.y;
        }

        let sol = a
            .lu()
            .solve(&b)
            .ok_or_else(|| GhostError::degenerate("perspective system is singular"))?;
        if sol.iter().any(|v| !v.is_finite()) {
            return Err(GhostError::degenerate(
                "perspective solution is not finite",
            ));
        }

        let mut coeffs = [0.0; 8];
        coeffs.copy_from_slice(sol.as_slice());
        Ok(Homography { coeffs })
    }

    /// Homography taking the `w` x `h` rectangle onto its [`skew_quad`].
    pub fn for_skew(w: f64, h: f64, skew: f64) -> GhostResult<Homography> {
        if skew == 0.0 {
            return Ok(Homography::IDENTITY);
        }
        Self::solve(&rect_corners(w, h), &skew_quad(w, h, skew))
    }
}

fn reject_colinear(quad: &[Point; 4], which: &str) -> GhostResult<()> {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    for [i, j, k] in TRIPLES {
        let (p, q, r) = (quad[i], quad[j], quad[k]);
        let cross = (q - p).cross(r - p);
        let scale = (q - p).hypot().max((r - p).hypot()).max(1.0);
        if cross.abs() <= COLINEAR_EPS * scale * scale {
            return Err(GhostError::degenerate(format!(
                "{which} points {i}, {j}, {k} are colinear"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/perspective.rs"]
mod tests;
