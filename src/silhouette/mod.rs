//! Vehicle silhouettes per canonical viewpoint.
//!
//! A [`SilhouetteProvider`] turns a [`Viewpoint`] into either vector geometry (control polylines,
//! wheels, anchors) or an already rasterized outline that only needs placing on the canvas.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::effects::place::Placement;
use crate::foundation::core::{BoundingBox, Canvas, Point};
use crate::foundation::error::{GhostError, GhostResult};
use crate::render::layer::RenderLayer;

/// Extracted outlines from a source bitmap.
pub mod extracted;
/// Hand-authored geometry resolved against the canvas.
pub mod parametric;
/// Declarative per-viewpoint geometry tables.
pub mod tables;

pub use extracted::ExtractedSilhouetteModel;
pub use parametric::ParametricSilhouetteModel;

/// Canonical camera position relative to the vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewpoint {
    /// Driver side, square to the vehicle.
    SideDriver,
    /// Front-left corner at 45 degrees.
    #[serde(rename = "front_left_45")]
    FrontLeft45,
    /// Directly behind the vehicle.
    RearCenter,
}

impl Viewpoint {
    /// Every viewpoint in output order.
    pub const ALL: [Viewpoint; 3] = [
        Viewpoint::SideDriver,
        Viewpoint::FrontLeft45,
        Viewpoint::RearCenter,
    ];

    /// Stable name, also used as the output file stem.
    pub fn name(self) -> &'static str {
        match self {
            Self::SideDriver => "side_driver",
            Self::FrontLeft45 => "front_left_45",
            Self::RearCenter => "rear_center",
        }
    }

    /// Human-readable label shown on the template.
    pub fn label(self) -> &'static str {
        match self {
            Self::SideDriver => "Side Profile (Driver)",
            Self::FrontLeft45 => "Front Left 45°",
            Self::RearCenter => "Rear Center",
        }
    }
}

impl fmt::Display for Viewpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Viewpoint {
    type Err = GhostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| {
                GhostError::configuration(format!(
                    "unknown viewpoint \"{s}\" (expected side_driver, front_left_45 or rear_center)"
                ))
            })
    }
}

/// Selects the stroke style of a polyline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolylineRole {
    /// Body outline: glow, haze and full-strength stroke.
    Body,
    /// Glazing: thin, dimmer stroke.
    Window,
    /// Lights, seams, plate and grille.
    Detail,
}

/// Ordered control points in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlPolyline {
    /// Semantic tag such as `lower_body` or `windshield`.
    pub tag: &'static str,
    /// Stroke style.
    pub role: PolylineRole,
    /// Control points.
    pub points: Vec<Point>,
    /// The last point connects back to the first.
    pub closed: bool,
    /// `false` draws the points as authored (straight segments).
    pub smooth: bool,
}

/// A wheel ellipse in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelSpec {
    /// Wheel center.
    pub center: Point,
    /// Horizontal radius.
    pub rx: f64,
    /// Vertical radius. Equal to `rx` for a wheel seen square on.
    pub ry: f64,
}

impl WheelSpec {
    /// Axis-aligned extremes of the rim.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.center.x - self.rx,
            self.center.y - self.ry,
            self.center.x + self.rx,
            self.center.y + self.ry,
        )
    }
}

/// Named landmarks in final-canvas pixels.
pub type AnchorMap = BTreeMap<String, Point>;

/// Vector silhouette of one viewpoint, resolved to canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewpointGeometry {
    /// Viewpoint the geometry belongs to.
    pub viewpoint: Viewpoint,
    /// Body outlines.
    pub outlines: Vec<ControlPolyline>,
    /// Windows.
    pub windows: Vec<ControlPolyline>,
    /// Secondary details.
    pub details: Vec<ControlPolyline>,
    /// Wheels.
    pub wheels: Vec<WheelSpec>,
    /// Landmarks.
    pub anchors: AnchorMap,
    /// Enclosing box including the authored margin.
    pub bbox: BoundingBox,
}

impl ViewpointGeometry {
    /// All polylines, body outlines first.
    pub fn polylines(&self) -> impl Iterator<Item = &ControlPolyline> {
        self.outlines
            .iter()
            .chain(self.windows.iter())
            .chain(self.details.iter())
    }
}

/// An outline rasterized outside the vector pipeline, together with where it goes.
#[derive(Clone, Debug)]
pub struct RasterSilhouette {
    /// White-on-transparent edges.
    pub edges: RenderLayer,
    /// Faint filled body shape drawn under the edges.
    pub fill: RenderLayer,
    /// Default placement on the output canvas.
    pub placement: Placement,
    /// Margin added around the pasted rectangle to form the bounding box.
    pub bbox_margin: f64,
}

/// Output of a [`SilhouetteProvider`].
#[derive(Clone, Debug)]
pub enum Silhouette {
    /// Control polylines to smooth and rasterize.
    Vector(ViewpointGeometry),
    /// Pre-rasterized outline.
    Raster(RasterSilhouette),
}

/// Source of silhouettes for the template pipeline.
pub trait SilhouetteProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Build the silhouette of `viewpoint` for a `canvas`-sized template.
    fn silhouette(&self, viewpoint: Viewpoint, canvas: Canvas) -> GhostResult<Silhouette>;
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/mod.rs"]
mod tests;
