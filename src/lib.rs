//! Ghost-template overlays for guided vehicle photography.
//!
//! A ghost template is a transparent raster that shows a glowing vehicle outline, viewfinder
//! brackets, landmark crosshairs and short captions. A camera UI draws it over the live preview so
//! the user can line the vehicle up from a canonical viewpoint.
//!
//! - Pick a [`SilhouetteProvider`]: hand-authored geometry ([`ParametricSilhouetteModel`]) or
//!   outlines traced from a bitmap ([`ExtractedSilhouetteModel`])
//! - Describe the run with a [`TemplateConfig`]
//! - Drive it with a [`TemplateCompositor`] into a [`TemplateSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Pixel effects: blur, compositing, glow, placement.
pub mod effects;
/// Curve smoothing and perspective transforms.
pub mod geometry;
/// Layers, painting, text and annotations.
pub mod render;
/// Template orchestration.
pub mod session;
/// Vehicle silhouettes per viewpoint.
pub mod silhouette;

pub use crate::foundation::core::{BoundingBox, Canvas, Point, Rect, Rgba8};
pub use crate::foundation::error::{GhostError, GhostResult};

pub use crate::effects::place::Placement;
pub use crate::render::layer::RenderLayer;
pub use crate::render::text::FontBook;
pub use crate::session::compositor::{RenderSummary, TemplateCompositor};
pub use crate::session::config::TemplateConfig;
pub use crate::session::report::AnchorReport;
pub use crate::session::sink::{InMemorySink, PngDirSink, TemplateSink};
pub use crate::session::template::{RenderedTemplate, Stage, TemplateSpec};
pub use crate::silhouette::{
    ExtractedSilhouetteModel, ParametricSilhouetteModel, SilhouetteProvider, Viewpoint,
};
