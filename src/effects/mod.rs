//! Pixel effects over [`crate::render::layer::RenderLayer`] buffers.

/// Separable Gaussian blur.
pub mod blur;
/// Alpha compositing.
pub mod composite;
/// Haze, glow and crisp strokes for vector silhouettes.
pub mod glow;
/// Resize, mirror, skew and paste onto the output canvas.
pub mod place;
