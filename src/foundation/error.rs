use std::path::PathBuf;

use crate::session::template::Stage;

/// Convenience result alias used throughout the crate.
pub type GhostResult<T> = Result<T, GhostError>;

/// Error taxonomy for template generation.
#[derive(thiserror::Error, Debug)]
pub enum GhostError {
    /// Invalid configuration, or the output directory cannot be prepared.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required source bitmap does not exist.
    #[error("asset missing: {}", .0.display())]
    AssetMissing(PathBuf),

    /// A source bitmap exists but could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Perspective correspondences are colinear or the system is singular.
    #[error("degenerate transform: {0}")]
    DegenerateTransform(String),

    /// The preferred font could not be loaded.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// Malformed geometry or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or encoding failure.
    #[error("render error: {0}")]
    Render(String),

    /// A template failed at a given pipeline stage.
    #[error("template '{template}' failed while entering {stage}: {source}")]
    Stage {
        /// Template name (for example `side_driver`).
        template: String,
        /// Stage the template was transitioning into.
        stage: Stage,
        /// Underlying failure.
        #[source]
        source: Box<GhostError>,
    },

    /// Passthrough for foreign errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GhostError {
    /// Build a [`GhostError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`GhostError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`GhostError::DegenerateTransform`].
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateTransform(msg.into())
    }

    /// Build a [`GhostError::FontUnavailable`].
    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    /// Build a [`GhostError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GhostError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Wrap `self` with the template name and stage it failed in.
    pub fn at_stage(self, template: impl Into<String>, stage: Stage) -> Self {
        Self::Stage {
            template: template.into(),
            stage,
            source: Box::new(self),
        }
    }

    /// Return `true` when this error (or the error it wraps) must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::Stage { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
