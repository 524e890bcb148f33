use std::path::PathBuf;

use tracing::debug;

use crate::foundation::core::Canvas;
use crate::foundation::error::{GhostError, GhostResult};
use crate::session::report::{ANCHOR_REPORT_FILE, AnchorReport};
use crate::session::template::RenderedTemplate;

/// Destination for rendered templates.
///
/// Call order: `begin` once, `persist` per template in template order, `end` once with the
/// anchor report of the templates that rendered.
pub trait TemplateSink: Send {
    /// Called once before any template renders.
    fn begin(&mut self, canvas: Canvas) -> GhostResult<()>;
    /// Store one template.
    fn persist(&mut self, template: &RenderedTemplate) -> GhostResult<()>;
    /// Called once after the last template.
    fn end(&mut self, report: &AnchorReport) -> GhostResult<()>;
}

/// Writes `<name>.png` files and `anchors.json` into a directory.
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngDirSink {
    /// Sink writing into `dir`. The directory is created by [`TemplateSink::begin`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl TemplateSink for PngDirSink {
    fn begin(&mut self, _canvas: Canvas) -> GhostResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            GhostError::configuration(format!(
                "create output dir '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.written.clear();
        Ok(())
    }

    fn persist(&mut self, template: &RenderedTemplate) -> GhostResult<()> {
        let path = self.dir.join(format!("{}.png", template.name));
        let layer = &template.layer;
        image::save_buffer_with_format(
            &path,
            layer.data(),
            layer.width(),
            layer.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| GhostError::render(format!("write png '{}': {e}", path.display())))?;
        debug!(path = %path.display(), "wrote template");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self, report: &AnchorReport) -> GhostResult<()> {
        let path = self.dir.join(ANCHOR_REPORT_FILE);
        report.write_to(&path)?;
        self.written.push(path);
        Ok(())
    }
}

/// Keeps rendered templates in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    canvas: Option<Canvas>,
    templates: Vec<RenderedTemplate>,
    report: Option<AnchorReport>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas announced in `begin`.
    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Persisted templates in order.
    pub fn templates(&self) -> &[RenderedTemplate] {
        &self.templates
    }

    /// Template named `name`.
    pub fn get(&self, name: &str) -> Option<&RenderedTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Report received in `end`.
    pub fn report(&self) -> Option<&AnchorReport> {
        self.report.as_ref()
    }
}

impl TemplateSink for InMemorySink {
    fn begin(&mut self, canvas: Canvas) -> GhostResult<()> {
        self.canvas = Some(canvas);
        self.templates.clear();
        self.report = None;
        Ok(())
    }

    fn persist(&mut self, template: &RenderedTemplate) -> GhostResult<()> {
        self.templates.push(template.clone());
        Ok(())
    }

    fn end(&mut self, report: &AnchorReport) -> GhostResult<()> {
        self.report = Some(report.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sink.rs"]
mod tests;
