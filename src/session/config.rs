use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::effects::glow::{GlowStyle, StrokeStyle};
use crate::effects::place::Placement;
use crate::foundation::core::Canvas;
use crate::foundation::error::{GhostError, GhostResult};
use crate::geometry::curve::DEFAULT_SAMPLES_PER_SEGMENT;
use crate::render::annotate::AnnotationStyle;
use crate::session::template::TemplateSpec;
use crate::silhouette::Viewpoint;

/// Instruction drawn on every template unless overridden.
pub const DEFAULT_INSTRUCTION: &str = "Align vehicle with outline";
/// Densest accepted curve sampling per control segment.
pub const MAX_CURVE_SAMPLES: usize = 1024;
/// Most glow passes accepted per body outline.
pub const MAX_GLOW_PASSES: u32 = 64;

/// Per-template replacements for the defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateOverride {
    /// Replacement label.
    pub label: Option<String>,
    /// Replacement instruction.
    pub instruction: Option<String>,
    /// Placement on the canvas.
    pub placement: Option<Placement>,
}

/// Everything a template run needs. Every field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Directory receiving `<name>.png` and `anchors.json`.
    pub output_dir: PathBuf,
    /// Catmull-Rom samples per control segment.
    pub curve_samples: usize,
    /// Crisp stroke style.
    pub stroke: StrokeStyle,
    /// Glow and haze.
    pub glow: GlowStyle,
    /// Viewfinder decorations.
    pub annotation: AnnotationStyle,
    /// Preferred font file.
    pub font_path: Option<PathBuf>,
    /// Instruction text for every template.
    pub instruction: String,
    /// Render templates on a dedicated thread pool.
    pub parallel: bool,
    /// Worker count for the pool. `None` uses the rayon default.
    pub threads: Option<usize>,
    /// Templates to render, by name. Empty renders all of them.
    pub only: Vec<String>,
    /// Per-template overrides keyed by template name.
    pub overrides: BTreeMap<String, TemplateOverride>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::REFERENCE,
            output_dir: PathBuf::from("templates"),
            curve_samples: DEFAULT_SAMPLES_PER_SEGMENT,
            stroke: StrokeStyle::default(),
            glow: GlowStyle::default(),
            annotation: AnnotationStyle::default(),
            font_path: None,
            instruction: DEFAULT_INSTRUCTION.to_owned(),
            parallel: false,
            threads: None,
            only: Vec::new(),
            overrides: BTreeMap::new(),
        }
    }
}

impl TemplateConfig {
    /// Read and validate a JSON config.
    pub fn from_path(path: impl AsRef<Path>) -> GhostResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GhostError::configuration(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            GhostError::configuration(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config held in memory.
    pub fn from_json(json: &str) -> GhostResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| GhostError::configuration(format!("parse config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ranges and template names.
    pub fn validate(&self) -> GhostResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;

        if self.output_dir.as_os_str().is_empty() {
            return Err(GhostError::configuration("output_dir must not be empty"));
        }
        if self.threads == Some(0) {
            return Err(GhostError::configuration("threads must be >= 1 when set"));
        }

        if self.curve_samples > MAX_CURVE_SAMPLES {
            return Err(GhostError::configuration(format!(
                "curve_samples must be <= {MAX_CURVE_SAMPLES}"
            )));
        }

        let s = &self.stroke;
        for (field, width) in [
            ("stroke.width", s.width),
            ("stroke.window_width", s.window_width),
            ("stroke.detail_width", s.detail_width),
            ("stroke.wheel_width", s.wheel_width),
        ] {
            positive(field, width)?;
        }

        let g = &self.glow;
        if g.passes > MAX_GLOW_PASSES {
            return Err(GhostError::configuration(format!(
                "glow.passes must be <= {MAX_GLOW_PASSES}"
            )));
        }
        if !(0.0..=1.0).contains(&g.base_alpha) {
            return Err(GhostError::configuration(
                "glow.base_alpha must be within [0, 1]",
            ));
        }
        if !(g.width_step.is_finite() && g.width_step >= 0.0) {
            return Err(GhostError::configuration(
                "glow.width_step must be finite and >= 0",
            ));
        }
        if !(g.ambient.intensity.is_finite() && g.ambient.intensity >= 0.0) {
            return Err(GhostError::configuration(
                "glow.ambient.intensity must be finite and >= 0",
            ));
        }

        let a = &self.annotation;
        for (field, v) in [
            ("annotation.bracket_length", a.bracket_length),
            ("annotation.bracket_width", a.bracket_width),
            ("annotation.crosshair_size", a.crosshair_size),
            ("annotation.crosshair_width", a.crosshair_width),
            ("annotation.label_size", f64::from(a.label_size)),
            ("annotation.instruction_size", f64::from(a.instruction_size)),
        ] {
            positive(field, v)?;
        }
        for (field, v) in [
            ("annotation.bracket_padding", a.bracket_padding),
            ("annotation.dot_radius", a.dot_radius),
            ("annotation.chip_padding", a.chip_padding),
            ("annotation.chip_radius", a.chip_radius),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(GhostError::configuration(format!(
                    "{field} must be finite and >= 0"
                )));
            }
        }
        for (field, v) in [
            ("annotation.label_y", a.label_y),
            ("annotation.instruction_y", a.instruction_y),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(GhostError::configuration(format!(
                    "{field} must be within [0, 1]"
                )));
            }
        }

        for name in self.only.iter().chain(self.overrides.keys()) {
            name.parse::<Viewpoint>()?;
        }
        for (name, o) in &self.overrides {
            if let Some(p) = &o.placement {
                p.validate().map_err(|e| {
                    GhostError::configuration(format!("overrides.{name}.placement: {e}"))
                })?;
            }
        }
        Ok(())
    }

    /// Templates selected by `only`, in canonical order, with overrides applied.
    pub fn templates(&self) -> Vec<TemplateSpec> {
        Viewpoint::ALL
            .into_iter()
            .filter(|v| self.only.is_empty() || self.only.iter().any(|n| n == v.name()))
            .map(|v| {
                let mut spec = TemplateSpec::for_viewpoint(v, self.instruction.clone());
                if let Some(o) = self.overrides.get(v.name()) {
                    if let Some(label) = &o.label {
                        spec.label = label.clone();
                    }
                    if let Some(instruction) = &o.instruction {
                        spec.instruction = instruction.clone();
                    }
                    spec.placement = o.placement.clone();
                }
                spec
            })
            .collect()
    }
}

fn positive(field: &str, v: f64) -> GhostResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(GhostError::configuration(format!(
            "{field} must be finite and > 0"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
