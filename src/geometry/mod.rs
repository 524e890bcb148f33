//! Pure 2D geometry: curve smoothing and planar perspective.

/// Catmull-Rom smoothing of control polylines.
pub mod curve;
/// Four-point homographies and skew quads.
pub mod perspective;
