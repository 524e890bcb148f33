use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Canvas;
use crate::foundation::error::{GhostError, GhostResult};
use crate::silhouette::AnchorMap;

/// File name of the report inside the output directory.
pub const ANCHOR_REPORT_FILE: &str = "anchors.json";

/// Anchors of every template as `[x / width, y / height]`, keyed by template then anchor name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorReport {
    templates: BTreeMap<String, BTreeMap<String, [f64; 2]>>,
}

impl AnchorReport {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `anchors` of `template`, normalized against `canvas`. Replaces an earlier entry.
    pub fn insert(&mut self, template: impl Into<String>, anchors: &AnchorMap, canvas: Canvas) {
        let normalized = anchors
            .iter()
            .map(|(name, p)| (name.clone(), canvas.normalize(*p)))
            .collect();
        self.templates.insert(template.into(), normalized);
    }

    /// Normalized anchors of `template`.
    pub fn get(&self, template: &str) -> Option<&BTreeMap<String, [f64; 2]>> {
        self.templates.get(template)
    }

    /// Template names in order.
    pub fn templates(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// `true` when no template was recorded.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> GhostResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GhostError::render(format!("serialize anchor report: {e}")))
    }

    /// One `template.anchor  x  y` line per anchor, fractions to four decimals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (template, anchors) in &self.templates {
            let _ = writeln!(out, "{template}");
            if anchors.is_empty() {
                let _ = writeln!(out, "  (no anchors)");
            }
            for (name, [x, y]) in anchors {
                let _ = writeln!(out, "  {name:<16} {x:.4} {y:.4}");
            }
        }
        out
    }

    /// Write [`Self::to_json`] to `path`.
    pub fn write_to(&self, path: &Path) -> GhostResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json + "\n")
            .map_err(|e| GhostError::render(format!("write '{}': {e}", path.display())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/report.rs"]
mod tests;
