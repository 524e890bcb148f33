//! Font discovery and single-line text layout.
//!
//! Faces are resolved once per run into a [`FontBook`], then shaped per template by a
//! [`TextEngine`] (Parley contexts are not shared across threads).

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{GhostError, GhostResult};
use crate::render::raster::{Painter, paint};

/// Well-known locations of clean sans-serif faces, tried in order.
pub const KNOWN_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/SFCompact.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
];

/// Advance per character, as a fraction of the font size, when no face is available.
const ESTIMATED_ADVANCE: f32 = 0.55;
/// Line height, as a fraction of the font size, when no face is available.
const ESTIMATED_LINE_HEIGHT: f32 = 1.2;

#[derive(Clone)]
struct FontFace {
    bytes: Arc<Vec<u8>>,
    index: u32,
    source: String,
}

/// The face used for template text, if any could be found.
#[derive(Clone, Default)]
pub struct FontBook {
    face: Option<FontFace>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("source", &self.source())
            .finish()
    }
}

impl FontBook {
    /// A book without any face. Text is measured from estimated metrics and not drawn.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Use `bytes` (face `index`) as the template face.
    pub fn from_bytes(bytes: Vec<u8>, index: u32, source: impl Into<String>) -> Self {
        Self {
            face: Some(FontFace {
                bytes: Arc::new(bytes),
                index,
                source: source.into(),
            }),
        }
    }

    /// Resolve a face: `preferred`, then [`KNOWN_FONT_PATHS`], then the system sans-serif.
    ///
    /// Every miss is logged; running out of candidates yields [`FontBook::empty`].
    pub fn discover(preferred: Option<&Path>) -> Self {
        if let Some(path) = preferred {
            match read_font(path) {
                Ok(book) => return book,
                Err(e) => warn!(error = %e, "preferred font rejected, falling back"),
            }
        }

        for candidate in KNOWN_FONT_PATHS {
            if let Ok(book) = read_font(Path::new(candidate)) {
                return book;
            }
        }

        match system_sans_serif() {
            Ok(book) => book,
            Err(e) => {
                warn!(error = %e, "no usable font, labels will be drawn without glyphs");
                Self::empty()
            }
        }
    }

    /// Where the face came from, for diagnostics.
    pub fn source(&self) -> Option<&str> {
        self.face.as_ref().map(|f| f.source.as_str())
    }

    /// `true` when a face is available.
    pub fn has_face(&self) -> bool {
        self.face.is_some()
    }
}

fn read_font(path: &Path) -> GhostResult<FontBook> {
    let bytes = std::fs::read(path).map_err(|e| {
        GhostError::font_unavailable(format!("cannot read '{}': {e}", path.display()))
    })?;
    if bytes.is_empty() {
        return Err(GhostError::font_unavailable(format!(
            "'{}' is empty",
            path.display()
        )));
    }
    debug!(font = %path.display(), "loaded font");
    Ok(FontBook::from_bytes(bytes, 0, path.display().to_string()))
}

fn system_sans_serif() -> GhostResult<FontBook> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let query = usvg::fontdb::Query {
        families: &[usvg::fontdb::Family::SansSerif],
        ..usvg::fontdb::Query::default()
    };
    let id = db
        .query(&query)
        .ok_or_else(|| GhostError::font_unavailable("no system sans-serif face"))?;
    let source = db
        .face(id)
        .map(|f| match &f.source {
            usvg::fontdb::Source::File(p) | usvg::fontdb::Source::SharedFile(p, _) => {
                p.display().to_string()
            }
            usvg::fontdb::Source::Binary(_) => "system font".to_owned(),
        })
        .unwrap_or_else(|| "system font".to_owned());
    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| GhostError::font_unavailable("system face data unavailable"))?;
    debug!(font = %source, "using system sans-serif");
    Ok(FontBook::from_bytes(bytes, index, source))
}

/// Measured single-line text ready to draw.
pub struct TextBlock {
    layout: Option<parley::Layout<Rgba8>>,
    width: f32,
    height: f32,
}

impl TextBlock {
    /// Advance width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Line height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// `true` when glyphs are available for drawing.
    pub fn has_glyphs(&self) -> bool {
        self.layout.is_some()
    }
}

struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Shapes text with the [`FontBook`] face.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    font: Option<LoadedFont>,
}

impl TextEngine {
    /// Register the book's face with fresh Parley contexts.
    pub fn new(book: &FontBook) -> Self {
        let mut font_ctx = parley::FontContext::default();
        let font = book.face.as_ref().and_then(|face| {
            let families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(face.bytes.to_vec()), None);
            let family = families
                .first()
                .and_then(|(id, _)| font_ctx.collection.family_name(*id))
                .map(str::to_owned);
            if family.is_none() {
                warn!(font = %face.source, "face registered without a family name");
            }
            family.map(|family| LoadedFont {
                family,
                data: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.bytes.to_vec()),
                    face.index,
                ),
            })
        });
        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font,
        }
    }

    /// Lay out `text` on one line at `size_px`.
    pub fn layout(&mut self, text: &str, size_px: f32, color: Rgba8) -> GhostResult<TextBlock> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(GhostError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let Some(font) = &self.font else {
            return Ok(TextBlock {
                layout: None,
                width: text.chars().count() as f32 * size_px * ESTIMATED_ADVANCE,
                height: size_px * ESTIMATED_LINE_HEIGHT,
            });
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        let (width, height) = (layout.width(), layout.height());
        Ok(TextBlock {
            layout: Some(layout),
            width,
            height,
        })
    }

    /// Fill the glyphs of `block` with their top-left corner at `origin`.
    pub fn draw(&self, painter: &mut Painter, block: &TextBlock, origin: Point) {
        let (Some(font), Some(layout)) = (&self.font, &block.layout) else {
            return;
        };
        let ctx = painter.context();
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                ctx.set_paint(paint(run.style().brush));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font.data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
