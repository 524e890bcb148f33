use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::effects::glow::{self, RasterInput};
use crate::effects::place::{self, Placement, PlacementMap};
use crate::foundation::core::{BoundingBox, Point};
use crate::foundation::error::{GhostError, GhostResult};
use crate::geometry::curve::CurveSmoother;
use crate::render::annotate::{Captions, annotate};
use crate::render::layer::RenderLayer;
use crate::render::text::{FontBook, TextEngine};
use crate::session::config::TemplateConfig;
use crate::session::report::AnchorReport;
use crate::session::sink::TemplateSink;
use crate::session::template::{RenderedTemplate, Stage, TemplateRun, TemplateSpec};
use crate::silhouette::{
    AnchorMap, ControlPolyline, Silhouette, SilhouetteProvider, ViewpointGeometry,
};

/// Outcome of [`TemplateCompositor::render_all`].
#[derive(Debug, Default)]
pub struct RenderSummary {
    /// Names of the templates handed to the sink, in order.
    pub persisted: Vec<String>,
    /// Per-template failures, each wrapped with its template name and stage.
    pub failures: Vec<GhostError>,
    /// Anchors of the persisted templates.
    pub report: AnchorReport,
}

impl RenderSummary {
    /// `true` when every selected template was persisted.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives templates from silhouette to persisted raster.
///
/// Rendering is pure per template; a failing template does not stop the others.
pub struct TemplateCompositor {
    config: TemplateConfig,
    provider: Arc<dyn SilhouetteProvider>,
    fonts: FontBook,
    smoother: CurveSmoother,
}

impl TemplateCompositor {
    /// Validate `config` and bind it to a silhouette provider and a font.
    pub fn new(
        config: TemplateConfig,
        provider: Arc<dyn SilhouetteProvider>,
        fonts: FontBook,
    ) -> GhostResult<Self> {
        config.validate()?;
        let smoother = CurveSmoother::new(config.curve_samples);
        Ok(Self {
            config,
            provider,
            fonts,
            smoother,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Name of the silhouette provider.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Render one template up to [`Stage::Annotated`].
    #[tracing::instrument(skip_all, fields(template = %spec.name, provider = self.provider.name()))]
    pub fn render_one(&self, spec: &TemplateSpec) -> GhostResult<RenderedTemplate> {
        let canvas = self.config.canvas;
        let mut run = TemplateRun::new(spec.name.clone());

        let silhouette = self
            .provider
            .silhouette(spec.viewpoint, canvas)
            .map_err(at_stage(&spec.name, Stage::GeometryBuilt))?;
        run.advance(Stage::GeometryBuilt)?;

        let prepared = match silhouette {
            Silhouette::Vector(g) => Prepared::Vector {
                input: self.smooth(&g),
                anchors: g.anchors,
                bbox: g.bbox,
            },
            Silhouette::Raster(r) => Prepared::Raster {
                fill: r.fill,
                edges: r.edges,
                placement: r.placement,
                margin: r.bbox_margin,
            },
        };
        run.advance(Stage::Smoothed)?;

        let (layer, anchors, bbox) = match prepared {
            Prepared::Vector {
                input,
                anchors,
                bbox,
            } => {
                let layer = glow::render(&input, canvas, &self.config.stroke, &self.config.glow)
                    .map_err(at_stage(&spec.name, Stage::Rasterized))?;
                run.advance(Stage::Rasterized)?;

                match &spec.placement {
                    Some(placement) => {
                        let (placed, map) = place::place(&[&layer], canvas, placement)
                            .map_err(at_stage(&spec.name, Stage::PerspectiveApplied))?;
                        run.advance(Stage::PerspectiveApplied)?;
                        (placed, map_anchors(&map, anchors), map.map_bbox(bbox))
                    }
                    None => (layer, anchors, bbox),
                }
            }
            Prepared::Raster {
                fill,
                edges,
                placement,
                margin,
            } => {
                let edges = glow::ambient_glow(&edges, &self.config.glow.ambient)
                    .map_err(at_stage(&spec.name, Stage::Rasterized))?;
                run.advance(Stage::Rasterized)?;

                let placement = spec.placement.as_ref().unwrap_or(&placement);
                let (placed, map) = place::place(&[&fill, &edges], canvas, placement)
                    .map_err(at_stage(&spec.name, Stage::PerspectiveApplied))?;
                run.advance(Stage::PerspectiveApplied)?;
                (placed, AnchorMap::new(), map.paste_rect().expand(margin))
            }
        };

        let mut text = TextEngine::new(&self.fonts);
        let captions = Captions {
            label: &spec.label,
            instruction: &spec.instruction,
        };
        let layer = annotate(
            &layer,
            bbox,
            &anchors,
            captions,
            &self.config.annotation,
            &mut text,
        )
        .map_err(at_stage(&spec.name, Stage::Annotated))?;
        run.advance(Stage::Annotated)?;

        Ok(RenderedTemplate {
            name: spec.name.clone(),
            viewpoint: spec.viewpoint,
            layer,
            anchors,
            bbox,
            run,
        })
    }

    /// Render every selected template and hand the results to `sink` in template order.
    ///
    /// Configuration problems abort the run before anything is persisted. Any other failure is
    /// recorded in the summary and the remaining templates still render.
    pub fn render_all(&self, sink: &mut dyn TemplateSink) -> GhostResult<RenderSummary> {
        let specs = self.config.templates();
        let canvas = self.config.canvas;
        sink.begin(canvas)?;
        info!(
            templates = specs.len(),
            provider = self.provider.name(),
            parallel = self.config.parallel,
            "rendering templates"
        );

        let mut results: Vec<GhostResult<RenderedTemplate>> = if self.config.parallel {
            let pool = build_thread_pool(self.config.threads)?;
            pool.install(|| specs.par_iter().map(|s| self.render_one(s)).collect())
        } else {
            specs.iter().map(|s| self.render_one(s)).collect()
        };

        let fatal = results
            .iter()
            .position(|r| r.as_ref().is_err_and(GhostError::is_fatal));
        if let Some(Err(e)) = fatal.map(|i| results.swap_remove(i)) {
            return Err(e);
        }

        let mut summary = RenderSummary::default();
        for result in results {
            let mut template = match result {
                Ok(t) => t,
                Err(e) => {
                    warn!(error = %e, "template failed");
                    summary.failures.push(e);
                    continue;
                }
            };
            let persisted = sink
                .persist(&template)
                .and_then(|()| template.run.advance(Stage::Persisted));
            match persisted {
                Ok(()) => {
                    info!(template = %template.name, "persisted");
                    summary
                        .report
                        .insert(template.name.clone(), &template.anchors, canvas);
                    summary.persisted.push(template.name);
                }
                Err(e) => {
                    let e = e.at_stage(template.name, Stage::Persisted);
                    warn!(error = %e, "template failed");
                    summary.failures.push(e);
                }
            }
        }

        sink.end(&summary.report)?;
        Ok(summary)
    }

    /// Anchors of every selected template without rasterizing anything.
    pub fn anchor_report(&self) -> GhostResult<AnchorReport> {
        let canvas = self.config.canvas;
        let mut report = AnchorReport::new();
        for spec in self.config.templates() {
            let anchors = match self
                .provider
                .silhouette(spec.viewpoint, canvas)
                .map_err(|e| e.at_stage(spec.name.as_str(), Stage::GeometryBuilt))?
            {
                Silhouette::Vector(g) => match &spec.placement {
                    Some(placement) => {
                        let map = place::plan(canvas.width, canvas.height, canvas, placement)?;
                        map_anchors(&map, g.anchors)
                    }
                    None => g.anchors,
                },
                Silhouette::Raster(_) => AnchorMap::new(),
            };
            report.insert(spec.name, &anchors, canvas);
        }
        Ok(report)
    }

    fn smooth(&self, g: &ViewpointGeometry) -> RasterInput {
        let smooth = |polys: &[ControlPolyline]| -> Vec<Vec<Point>> {
            polys
                .iter()
                .map(|p| self.smoother.smooth_polyline(p))
                .collect()
        };
        RasterInput {
            outlines: smooth(&g.outlines),
            windows: smooth(&g.windows),
            details: smooth(&g.details),
            wheels: g.wheels.clone(),
        }
    }
}

enum Prepared {
    Vector {
        input: RasterInput,
        anchors: AnchorMap,
        bbox: BoundingBox,
    },
    Raster {
        fill: RenderLayer,
        edges: RenderLayer,
        placement: Placement,
        margin: f64,
    },
}

fn at_stage(template: &str, stage: Stage) -> impl FnOnce(GhostError) -> GhostError + '_ {
    move |e| e.at_stage(template, stage)
}

fn map_anchors(map: &PlacementMap, anchors: AnchorMap) -> AnchorMap {
    anchors
        .into_iter()
        .map(|(name, p)| (name, map.map_point(p)))
        .collect()
}

fn build_thread_pool(threads: Option<usize>) -> GhostResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GhostError::configuration("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GhostError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/compositor.rs"]
mod tests;
