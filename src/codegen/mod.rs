//! Scene model to script text.

/// Per-dialect spellings.
pub mod dialect;
/// Full scripts, bodies, replay fragments and the preview harness.
pub mod generator;
