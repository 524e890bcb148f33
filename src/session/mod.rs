//! Template orchestration: configuration, the per-template state machine, persistence.

/// Renders templates end to end.
pub mod compositor;
/// Serialized run configuration.
pub mod config;
/// Normalized anchor export.
pub mod report;
/// Destinations for rendered templates.
pub mod sink;
/// Template descriptions, stages and results.
pub mod template;
