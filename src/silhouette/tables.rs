//! Declarative sedan geometry for each viewpoint.
//!
//! Every point is a [`FracPoint`]: `x` is a fraction of canvas width, `dy` a fraction of canvas
//! height measured from the viewpoint's baseline. Proportions follow a mid-size sedan: wheelbase
//! around 0.57 to 0.64 of the frame width, roof peak near mid-width, wheel radius 3.5 to 4.5%
//! of the frame height.

use std::collections::BTreeSet;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{GhostError, GhostResult};
use crate::silhouette::{PolylineRole, Viewpoint};

/// Default vertical baseline as a fraction of canvas height.
pub const BASELINE: f64 = 0.52;

/// Authored point relative to the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FracPoint {
    /// Fraction of canvas width.
    pub x: f64,
    /// Fraction of canvas height below (positive) or above (negative) the baseline.
    pub dy: f64,
}

/// Shorthand constructor for table literals.
pub const fn fp(x: f64, dy: f64) -> FracPoint {
    FracPoint { x, dy }
}

impl FracPoint {
    /// Fractions of the canvas after applying `baseline`.
    pub fn fractions(self, baseline: f64) -> (f64, f64) {
        (self.x, baseline + self.dy)
    }

    /// Pixel position on `canvas`.
    pub fn resolve(self, canvas: Canvas, baseline: f64) -> Point {
        let (fx, fy) = self.fractions(baseline);
        Point::new(canvas.w() * fx, canvas.h() * fy)
    }
}

/// One authored curve.
#[derive(Debug)]
pub struct CurveDef {
    /// Semantic tag.
    pub tag: &'static str,
    /// Stroke style.
    pub role: PolylineRole,
    /// Control points.
    pub points: &'static [FracPoint],
    /// Connect the last point back to the first.
    pub closed: bool,
    /// Interpolate with Catmull-Rom; `false` keeps straight segments.
    pub smooth: bool,
}

/// One authored wheel. Radii are fractions of canvas height.
#[derive(Debug)]
pub struct WheelDef {
    /// Wheel name, for diagnostics.
    pub name: &'static str,
    /// Center.
    pub center: FracPoint,
    /// Horizontal radius.
    pub rx: f64,
    /// Vertical radius.
    pub ry: f64,
}

/// Geometry of one viewpoint.
#[derive(Debug)]
pub struct ViewpointTable {
    /// Viewpoint described.
    pub viewpoint: Viewpoint,
    /// Vertical baseline as a fraction of canvas height.
    pub baseline: f64,
    /// Curves, drawn in order within their role.
    pub curves: &'static [CurveDef],
    /// Wheels.
    pub wheels: &'static [WheelDef],
    /// Named landmarks.
    pub anchors: &'static [(&'static str, FracPoint)],
    /// Top-left and bottom-right corners of the framing box.
    pub bbox: [FracPoint; 2],
    /// How far (as a fraction) geometry may extend outside `[0, 1]`.
    pub bleed: f64,
}

impl ViewpointTable {
    /// Check fractions, anchor uniqueness, curve sizes and wheel radii.
    pub fn validate(&self) -> GhostResult<()> {
        let lo = -self.bleed;
        let hi = 1.0 + self.bleed;
        let in_range = |p: FracPoint| {
            let (fx, fy) = p.fractions(self.baseline);
            (lo..=hi).contains(&fx) && (lo..=hi).contains(&fy)
        };
        let name = self.viewpoint.name();

        for curve in self.curves {
            if curve.points.len() < 2 {
                return Err(GhostError::validation(format!(
                    "{name}: curve '{}' needs at least 2 points",
                    curve.tag
                )));
            }
            if let Some(p) = curve.points.iter().copied().find(|&p| !in_range(p)) {
                return Err(GhostError::validation(format!(
                    "{name}: curve '{}' point ({}, {}) leaves the canvas",
                    curve.tag, p.x, p.dy
                )));
            }
        }

        for wheel in self.wheels {
            if !(wheel.rx > 0.0 && wheel.ry > 0.0) {
                return Err(GhostError::validation(format!(
                    "{name}: wheel '{}' radii must be > 0",
                    wheel.name
                )));
            }
            if !in_range(wheel.center) {
                return Err(GhostError::validation(format!(
                    "{name}: wheel '{}' center leaves the canvas",
                    wheel.name
                )));
            }
        }

        let mut seen = BTreeSet::new();
        for (anchor, p) in self.anchors {
            if !seen.insert(*anchor) {
                return Err(GhostError::validation(format!(
                    "{name}: duplicate anchor '{anchor}'"
                )));
            }
            if !in_range(*p) {
                return Err(GhostError::validation(format!(
                    "{name}: anchor '{anchor}' leaves the canvas"
                )));
            }
        }

        let [tl, br] = self.bbox;
        if !(tl.x < br.x && tl.dy < br.dy) || !in_range(tl) || !in_range(br) {
            return Err(GhostError::validation(format!("{name}: malformed bbox")));
        }
        Ok(())
    }
}

/// Table for `viewpoint`.
pub fn table(viewpoint: Viewpoint) -> &'static ViewpointTable {
    match viewpoint {
        Viewpoint::SideDriver => &SIDE_DRIVER,
        Viewpoint::FrontLeft45 => &FRONT_LEFT_45,
        Viewpoint::RearCenter => &REAR_CENTER,
    }
}

const fn body(tag: &'static str, points: &'static [FracPoint]) -> CurveDef {
    CurveDef {
        tag,
        role: PolylineRole::Body,
        points,
        closed: false,
        smooth: true,
    }
}

const fn window(tag: &'static str, points: &'static [FracPoint]) -> CurveDef {
    CurveDef {
        tag,
        role: PolylineRole::Window,
        points,
        closed: false,
        smooth: true,
    }
}

const fn detail(
    tag: &'static str,
    points: &'static [FracPoint],
    closed: bool,
    smooth: bool,
) -> CurveDef {
    CurveDef {
        tag,
        role: PolylineRole::Detail,
        points,
        closed,
        smooth,
    }
}

// Side profile.

const SIDE_LOWER_BODY: &[FracPoint] = &[
    fp(0.04, 0.06),
    fp(0.06, 0.08),
    fp(0.08, 0.11),
    fp(0.12, 0.13),
    fp(0.18, 0.14),
    fp(0.24, 0.13),
    fp(0.28, 0.11),
    fp(0.35, 0.10),
    fp(0.50, 0.10),
    fp(0.65, 0.10),
    fp(0.72, 0.11),
    fp(0.76, 0.13),
    fp(0.82, 0.14),
    fp(0.88, 0.13),
    fp(0.92, 0.11),
    fp(0.94, 0.08),
    fp(0.96, 0.06),
];

const SIDE_UPPER_BODY: &[FracPoint] = &[
    fp(0.96, 0.06),
    fp(0.96, 0.02),
    fp(0.95, -0.01),
    fp(0.92, -0.04),
    fp(0.85, -0.06),
    fp(0.78, -0.10),
    fp(0.70, -0.12),
    fp(0.55, -0.13),
    fp(0.40, -0.12),
    fp(0.30, -0.10),
    fp(0.22, -0.06),
    fp(0.18, -0.04),
    fp(0.12, -0.01),
    fp(0.08, 0.01),
    fp(0.05, 0.03),
    fp(0.04, 0.06),
];

const SIDE_FRONT_WINDOW: &[FracPoint] = &[
    fp(0.24, -0.04),
    fp(0.32, -0.09),
    fp(0.46, -0.11),
    fp(0.46, -0.03),
];

const SIDE_REAR_WINDOW: &[FracPoint] = &[
    fp(0.50, -0.03),
    fp(0.50, -0.11),
    fp(0.68, -0.10),
    fp(0.76, -0.08),
    fp(0.82, -0.04),
];

const SIDE_DOOR_LINE: &[FracPoint] = &[fp(0.48, -0.03), fp(0.48, 0.10)];

const SIDE_HEADLIGHT: &[FracPoint] = &[
    fp(0.05, 0.015),
    fp(0.09, 0.005),
    fp(0.11, 0.02),
    fp(0.06, 0.03),
];

const SIDE_TAILLIGHT: &[FracPoint] = &[
    fp(0.95, 0.00),
    fp(0.955, 0.03),
    fp(0.93, 0.03),
    fp(0.92, 0.005),
];

static SIDE_DRIVER: ViewpointTable = ViewpointTable {
    viewpoint: Viewpoint::SideDriver,
    baseline: BASELINE,
    curves: &[
        body("lower_body", SIDE_LOWER_BODY),
        body("upper_body", SIDE_UPPER_BODY),
        window("front_window", SIDE_FRONT_WINDOW),
        window("rear_window", SIDE_REAR_WINDOW),
        detail("door_line", SIDE_DOOR_LINE, false, false),
        detail("headlight", SIDE_HEADLIGHT, true, true),
        detail("taillight", SIDE_TAILLIGHT, true, true),
    ],
    wheels: &[
        WheelDef {
            name: "front_wheel",
            center: fp(0.18, 0.10),
            rx: 0.045,
            ry: 0.045,
        },
        WheelDef {
            name: "rear_wheel",
            center: fp(0.82, 0.10),
            rx: 0.045,
            ry: 0.045,
        },
    ],
    anchors: &[
        ("front_wheel", fp(0.18, 0.10)),
        ("rear_wheel", fp(0.82, 0.10)),
        ("a_pillar", fp(0.30, -0.10)),
        ("c_pillar", fp(0.78, -0.10)),
        ("headlight", fp(0.05, 0.02)),
        ("taillight", fp(0.96, 0.02)),
    ],
    bbox: [fp(0.02, -0.16), fp(0.98, 0.17)],
    bleed: 0.0,
};

// Front-left three-quarter.

const FL_LOWER_BODY: &[FracPoint] = &[
    fp(0.06, 0.08),
    fp(0.08, 0.10),
    fp(0.14, 0.13),
    fp(0.22, 0.14),
    fp(0.28, 0.13),
    fp(0.32, 0.12),
    fp(0.50, 0.12),
    fp(0.65, 0.12),
    fp(0.70, 0.13),
    fp(0.76, 0.14),
    fp(0.84, 0.13),
    fp(0.90, 0.10),
    fp(0.92, 0.07),
];

const FL_UPPER_BODY: &[FracPoint] = &[
    fp(0.92, 0.07),
    fp(0.93, 0.02),
    fp(0.92, -0.01),
    fp(0.88, -0.04),
    fp(0.82, -0.09),
    fp(0.72, -0.12),
    fp(0.55, -0.13),
    fp(0.42, -0.12),
    fp(0.35, -0.09),
    fp(0.30, -0.04),
    fp(0.25, -0.01),
    fp(0.15, 0.01),
    fp(0.08, 0.03),
    fp(0.06, 0.05),
    fp(0.06, 0.08),
];

const FL_WINDSHIELD: &[FracPoint] = &[
    fp(0.31, -0.035),
    fp(0.36, -0.085),
    fp(0.50, -0.11),
    fp(0.50, -0.03),
];

const FL_REAR_WINDOW: &[FracPoint] = &[
    fp(0.54, -0.03),
    fp(0.54, -0.11),
    fp(0.72, -0.10),
    fp(0.80, -0.07),
    fp(0.83, -0.035),
];

const FL_HEADLIGHT: &[FracPoint] = &[
    fp(0.07, 0.03),
    fp(0.12, 0.01),
    fp(0.18, 0.02),
    fp(0.14, 0.05),
    fp(0.07, 0.05),
];

const FL_FRONT_FACE: &[FracPoint] = &[
    fp(0.065, 0.075),
    fp(0.10, 0.085),
    fp(0.16, 0.08),
    fp(0.20, 0.06),
    fp(0.18, 0.02),
];

const FL_GRILLE: &[FracPoint] = &[
    fp(0.08, 0.058),
    fp(0.15, 0.056),
    fp(0.15, 0.072),
    fp(0.08, 0.074),
];

const FL_DOOR_LINE: &[FracPoint] = &[fp(0.52, -0.03), fp(0.52, 0.12)];

static FRONT_LEFT_45: ViewpointTable = ViewpointTable {
    viewpoint: Viewpoint::FrontLeft45,
    baseline: BASELINE,
    curves: &[
        body("lower_body", FL_LOWER_BODY),
        body("upper_body", FL_UPPER_BODY),
        window("windshield", FL_WINDSHIELD),
        window("rear_window", FL_REAR_WINDOW),
        detail("headlight", FL_HEADLIGHT, true, true),
        detail("front_face", FL_FRONT_FACE, false, true),
        detail("grille", FL_GRILLE, true, false),
        detail("door_line", FL_DOOR_LINE, false, false),
    ],
    wheels: &[
        WheelDef {
            name: "front_wheel",
            center: fp(0.21, 0.11),
            rx: 0.04,
            ry: 0.04,
        },
        WheelDef {
            name: "rear_wheel",
            center: fp(0.78, 0.11),
            rx: 0.036,
            ry: 0.04,
        },
    ],
    anchors: &[
        ("front_wheel", fp(0.21, 0.11)),
        ("rear_wheel", fp(0.78, 0.11)),
        ("a_pillar", fp(0.35, -0.09)),
        ("c_pillar", fp(0.82, -0.09)),
        ("headlight", fp(0.12, 0.03)),
        ("roof_peak", fp(0.55, -0.13)),
    ],
    bbox: [fp(0.04, -0.16), fp(0.96, 0.17)],
    bleed: 0.0,
};

// Rear.

const REAR_BODY: &[FracPoint] = &[
    fp(0.18, 0.12),
    fp(0.18, 0.06),
    fp(0.19, 0.02),
    fp(0.20, -0.02),
    fp(0.24, -0.06),
    fp(0.30, -0.10),
    fp(0.38, -0.13),
    fp(0.50, -0.14),
    fp(0.62, -0.13),
    fp(0.70, -0.10),
    fp(0.76, -0.06),
    fp(0.80, -0.02),
    fp(0.81, 0.02),
    fp(0.82, 0.06),
    fp(0.82, 0.12),
];

const REAR_BOTTOM: &[FracPoint] = &[
    fp(0.82, 0.12),
    fp(0.78, 0.13),
    fp(0.22, 0.13),
    fp(0.18, 0.12),
];

const REAR_WINDOW: &[FracPoint] = &[
    fp(0.28, -0.05),
    fp(0.33, -0.10),
    fp(0.50, -0.12),
    fp(0.67, -0.10),
    fp(0.72, -0.05),
];

const REAR_TAILLIGHT_LEFT: &[FracPoint] = &[
    fp(0.20, 0.00),
    fp(0.28, -0.01),
    fp(0.28, 0.03),
    fp(0.20, 0.04),
];

const REAR_TAILLIGHT_RIGHT: &[FracPoint] = &[
    fp(0.72, -0.01),
    fp(0.80, 0.00),
    fp(0.80, 0.04),
    fp(0.72, 0.03),
];

const REAR_PLATE: &[FracPoint] = &[
    fp(0.38, 0.05),
    fp(0.62, 0.05),
    fp(0.62, 0.09),
    fp(0.38, 0.09),
];

const REAR_BUMPER: &[FracPoint] = &[
    fp(0.20, 0.100),
    fp(0.35, 0.106),
    fp(0.50, 0.108),
    fp(0.65, 0.106),
    fp(0.80, 0.100),
];

static REAR_CENTER: ViewpointTable = ViewpointTable {
    viewpoint: Viewpoint::RearCenter,
    baseline: BASELINE,
    curves: &[
        body("body", REAR_BODY),
        body("bottom", REAR_BOTTOM),
        window("rear_window", REAR_WINDOW),
        detail("taillight_left", REAR_TAILLIGHT_LEFT, true, false),
        detail("taillight_right", REAR_TAILLIGHT_RIGHT, true, false),
        detail("plate", REAR_PLATE, true, false),
        detail("bumper_line", REAR_BUMPER, false, true),
    ],
    wheels: &[
        WheelDef {
            name: "left_wheel",
            center: fp(0.22, 0.10),
            rx: 0.031,
            ry: 0.035,
        },
        WheelDef {
            name: "right_wheel",
            center: fp(0.78, 0.10),
            rx: 0.031,
            ry: 0.035,
        },
    ],
    anchors: &[
        ("left_wheel", fp(0.22, 0.10)),
        ("right_wheel", fp(0.78, 0.10)),
        ("left_taillight", fp(0.24, 0.015)),
        ("right_taillight", fp(0.76, 0.015)),
        ("roof_center", fp(0.50, -0.14)),
    ],
    bbox: [fp(0.14, -0.17), fp(0.86, 0.16)],
    bleed: 0.0,
};

#[cfg(test)]
#[path = "../../tests/unit/silhouette/tables.rs"]
mod tests;
