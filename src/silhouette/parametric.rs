use crate::foundation::core::{BoundingBox, Canvas};
use crate::foundation::error::{GhostError, GhostResult};
use crate::silhouette::tables::{self, ViewpointTable};
use crate::silhouette::{
    AnchorMap, ControlPolyline, PolylineRole, Silhouette, SilhouetteProvider, Viewpoint,
    ViewpointGeometry, WheelSpec,
};

/// Resolves the built-in sedan tables against a canvas. Pure and deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParametricSilhouetteModel;

impl ParametricSilhouetteModel {
    /// Create the model.
    pub fn new() -> Self {
        Self
    }

    /// Pixel geometry of `viewpoint` on `canvas`.
    pub fn geometry(&self, viewpoint: Viewpoint, canvas: Canvas) -> GhostResult<ViewpointGeometry> {
        resolve(tables::table(viewpoint), canvas)
    }
}

impl SilhouetteProvider for ParametricSilhouetteModel {
    fn name(&self) -> &'static str {
        "parametric"
    }

    fn silhouette(&self, viewpoint: Viewpoint, canvas: Canvas) -> GhostResult<Silhouette> {
        self.geometry(viewpoint, canvas).map(Silhouette::Vector)
    }
}

/// Resolve `table` to pixels on `canvas`.
pub fn resolve(table: &ViewpointTable, canvas: Canvas) -> GhostResult<ViewpointGeometry> {
    table.validate()?;
    let base = table.baseline;

    let mut outlines = Vec::new();
    let mut windows = Vec::new();
    let mut details = Vec::new();
    for curve in table.curves {
        let poly = ControlPolyline {
            tag: curve.tag,
            role: curve.role,
            points: curve
                .points
                .iter()
                .map(|p| p.resolve(canvas, base))
                .collect(),
            closed: curve.closed,
            smooth: curve.smooth,
        };
        match curve.role {
            PolylineRole::Body => outlines.push(poly),
            PolylineRole::Window => windows.push(poly),
            PolylineRole::Detail => details.push(poly),
        }
    }

    let wheels = table
        .wheels
        .iter()
        .map(|w| WheelSpec {
            center: w.center.resolve(canvas, base),
            rx: w.rx * canvas.h(),
            ry: w.ry * canvas.h(),
        })
        .collect();

    let mut anchors = AnchorMap::new();
    for (name, p) in table.anchors {
        if anchors
            .insert((*name).to_owned(), p.resolve(canvas, base))
            .is_some()
        {
            return Err(GhostError::validation(format!(
                "{}: duplicate anchor '{name}'",
                table.viewpoint
            )));
        }
    }

    let [tl, br] = table.bbox;
    let (tl, br) = (tl.resolve(canvas, base), br.resolve(canvas, base));
    let bbox = BoundingBox::new(tl.x, tl.y, br.x, br.y);

    Ok(ViewpointGeometry {
        viewpoint: table.viewpoint,
        outlines,
        windows,
        details,
        wheels,
        anchors,
        bbox,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/parametric.rs"]
mod tests;
