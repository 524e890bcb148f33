//! Rasterization: layers, vector painting, text and viewfinder annotations.

/// Reticle, brackets, crosshairs and caption chips.
pub mod annotate;
/// Straight-alpha RGBA8 buffers.
pub mod layer;
/// `vello_cpu`-backed painter.
pub mod raster;
/// Font discovery and text layout.
pub mod text;
