use std::path::Path;

use image::{GrayImage, Luma, RgbaImage};
use imageproc::distance_transform::Norm;
use tracing::debug;

use crate::effects::place::Placement;
use crate::foundation::core::Canvas;
use crate::foundation::error::{GhostError, GhostResult};
use crate::render::layer::RenderLayer;
use crate::silhouette::{RasterSilhouette, Silhouette, SilhouetteProvider, Viewpoint};

/// Alpha at or below which a source pixel counts as background.
pub const BACKGROUND_ALPHA: u8 = 20;
/// Alpha of extracted edge pixels.
pub const EDGE_ALPHA: u8 = 220;
/// Alpha of the filled body under the edges.
pub const FILL_ALPHA: u8 = 20;
/// Margin between the pasted rectangle and the framing box.
pub const BBOX_MARGIN: f64 = 28.0;

const LUMA_THRESHOLDS: (f32, f32) = (30.0, 100.0);
const ALPHA_THRESHOLDS: (f32, f32) = (50.0, 150.0);
const ALPHA_PRE_BLUR_SIGMA: f32 = 0.8;
const SIDE_WIDTH_FRACTION: f64 = 0.88;
const ANGLED_SHRINK: f64 = 0.95;

/// Outlines traced from a transparent-background vehicle bitmap.
///
/// Edges and fill are extracted once; every viewpoint reuses them with its own placement.
#[derive(Clone, Debug)]
pub struct ExtractedSilhouetteModel {
    edges: RenderLayer,
    fill: RenderLayer,
}

impl ExtractedSilhouetteModel {
    /// Load and trace the bitmap at `path`.
    pub fn from_path(path: &Path) -> GhostResult<Self> {
        if !path.exists() {
            return Err(GhostError::AssetMissing(path.to_path_buf()));
        }
        let img = image::open(path)
            .map_err(|e| GhostError::decode(format!("'{}': {e}", path.display())))?
            .to_rgba8();
        debug!(
            source = %path.display(),
            width = img.width(),
            height = img.height(),
            "tracing source bitmap"
        );
        Self::from_image(&img)
    }

    /// Trace an in-memory RGBA bitmap.
    pub fn from_image(img: &RgbaImage) -> GhostResult<Self> {
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            return Err(GhostError::decode("source bitmap is empty"));
        }
        Ok(Self {
            edges: extract_edges(img)?,
            fill: extract_fill(img)?,
        })
    }

    /// White-on-transparent edges.
    pub fn edges(&self) -> &RenderLayer {
        &self.edges
    }

    /// Faint body fill.
    pub fn fill(&self) -> &RenderLayer {
        &self.fill
    }

    /// Default canvas placement of the traced outline for `viewpoint`.
    pub fn placement_for(viewpoint: Viewpoint) -> Placement {
        let angled = SIDE_WIDTH_FRACTION * ANGLED_SHRINK;
        match viewpoint {
            Viewpoint::SideDriver => Placement {
                width_fraction: SIDE_WIDTH_FRACTION,
                offset: [0.0, 0.02],
                flip: false,
                skew: 0.0,
            },
            Viewpoint::FrontLeft45 => Placement {
                width_fraction: angled,
                offset: [-0.03, 0.02],
                flip: false,
                skew: -0.6,
            },
            Viewpoint::RearCenter => Placement {
                width_fraction: angled,
                offset: [0.03, 0.02],
                flip: true,
                skew: 0.6,
            },
        }
    }
}

impl SilhouetteProvider for ExtractedSilhouetteModel {
    fn name(&self) -> &'static str {
        "extracted"
    }

    fn silhouette(&self, viewpoint: Viewpoint, _canvas: Canvas) -> GhostResult<Silhouette> {
        Ok(Silhouette::Raster(RasterSilhouette {
            edges: self.edges.clone(),
            fill: self.fill.clone(),
            placement: Self::placement_for(viewpoint),
            bbox_margin: BBOX_MARGIN,
        }))
    }
}

/// Canny edges of the luminance (background forced white) OR-ed with Canny edges of the lightly
/// blurred alpha, dilated once.
fn extract_edges(img: &RgbaImage) -> GhostResult<RenderLayer> {
    let (w, h) = img.dimensions();

    let mut gray = image::imageops::grayscale(img);
    let mut alpha = GrayImage::new(w, h);
    for (x, y, px) in img.enumerate_pixels() {
        let a = px.0[3];
        alpha.put_pixel(x, y, Luma([a]));
        if a < BACKGROUND_ALPHA {
            gray.put_pixel(x, y, Luma([255]));
        }
    }

    let content = imageproc::edges::canny(&gray, LUMA_THRESHOLDS.0, LUMA_THRESHOLDS.1);
    let alpha = imageproc::filter::gaussian_blur_f32(&alpha, ALPHA_PRE_BLUR_SIGMA);
    let outline = imageproc::edges::canny(&alpha, ALPHA_THRESHOLDS.0, ALPHA_THRESHOLDS.1);

    let mut edges = content;
    for (e, o) in edges.pixels_mut().zip(outline.pixels()) {
        e.0[0] = e.0[0].max(o.0[0]);
    }
    let edges = imageproc::morphology::dilate(&edges, Norm::LInf, 1);

    let mut out = RenderLayer::transparent(w, h);
    for (x, y, px) in edges.enumerate_pixels() {
        if px.0[0] > 0 {
            out.set_pixel(x, y, [255, 255, 255, EDGE_ALPHA]);
        }
    }
    Ok(out)
}

fn extract_fill(img: &RgbaImage) -> GhostResult<RenderLayer> {
    let data = img
        .pixels()
        .flat_map(|px| {
            if px.0[3] > BACKGROUND_ALPHA {
                [255, 255, 255, FILL_ALPHA]
            } else {
                [0, 0, 0, 0]
            }
        })
        .collect();
    RenderLayer::from_straight(img.width(), img.height(), data)
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/extracted.rs"]
mod tests;
