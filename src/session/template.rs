use std::fmt;

use tracing::debug;

use crate::effects::place::Placement;
use crate::foundation::core::BoundingBox;
use crate::foundation::error::{GhostError, GhostResult};
use crate::render::layer::RenderLayer;
use crate::silhouette::{AnchorMap, Viewpoint};

/// Pipeline position of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Nothing built yet.
    Idle,
    /// Provider returned the silhouette.
    GeometryBuilt,
    /// Control polylines interpolated.
    Smoothed,
    /// Haze, glow and strokes drawn (or ambient glow added to a raster outline).
    Rasterized,
    /// Resized, mirrored, skewed and pasted onto the canvas.
    PerspectiveApplied,
    /// Viewfinder decorations drawn.
    Annotated,
    /// Handed to the sink.
    Persisted,
}

impl Stage {
    /// Snake-case name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::GeometryBuilt => "geometry_built",
            Self::Smoothed => "smoothed",
            Self::Rasterized => "rasterized",
            Self::PerspectiveApplied => "perspective_applied",
            Self::Annotated => "annotated",
            Self::Persisted => "persisted",
        }
    }

    /// `true` when `next` may directly follow `self`. Placement is the only optional stage.
    pub fn can_advance_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::GeometryBuilt)
                | (Self::GeometryBuilt, Self::Smoothed)
                | (Self::Smoothed, Self::Rasterized)
                | (Self::Rasterized, Self::PerspectiveApplied)
                | (Self::Rasterized, Self::Annotated)
                | (Self::PerspectiveApplied, Self::Annotated)
                | (Self::Annotated, Self::Persisted)
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One template to render.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateSpec {
    /// Output name, also the file stem.
    pub name: String,
    /// Silhouette to draw.
    pub viewpoint: Viewpoint,
    /// Caption near the top.
    pub label: String,
    /// Caption near the bottom.
    pub instruction: String,
    /// Explicit placement. Raster silhouettes fall back to their provider's placement.
    pub placement: Option<Placement>,
}

impl TemplateSpec {
    /// Default template for `viewpoint`.
    pub fn for_viewpoint(viewpoint: Viewpoint, instruction: impl Into<String>) -> Self {
        Self {
            name: viewpoint.name().to_owned(),
            viewpoint,
            label: viewpoint.label().to_owned(),
            instruction: instruction.into(),
            placement: None,
        }
    }
}

/// Tracks one template through the [`Stage`] sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateRun {
    name: String,
    stage: Stage,
}

impl TemplateRun {
    /// Start at [`Stage::Idle`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stage: Stage::Idle,
        }
    }

    /// Template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Move to `next`, rejecting anything but a legal successor.
    pub fn advance(&mut self, next: Stage) -> GhostResult<()> {
        if !self.stage.can_advance_to(next) {
            return Err(GhostError::validation(format!(
                "template '{}': illegal transition {} -> {next}",
                self.name, self.stage
            )));
        }
        debug!(template = %self.name, from = %self.stage, to = %next, "stage");
        self.stage = next;
        Ok(())
    }
}

/// A fully annotated template.
#[derive(Clone, Debug)]
pub struct RenderedTemplate {
    /// Output name.
    pub name: String,
    /// Viewpoint drawn.
    pub viewpoint: Viewpoint,
    /// Final raster.
    pub layer: RenderLayer,
    /// Landmarks in canvas pixels.
    pub anchors: AnchorMap,
    /// Box the brackets were drawn around (before padding).
    pub bbox: BoundingBox,
    pub(crate) run: TemplateRun,
}

impl RenderedTemplate {
    /// Stage reached so far.
    pub fn stage(&self) -> Stage {
        self.run.stage()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/template.rs"]
mod tests;
