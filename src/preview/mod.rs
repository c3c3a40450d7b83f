//! Collaborators outside the sync engine: preview process, replay channel, LaTeX lookup and
//! script export.

/// Script export to disk.
pub mod export;
/// LaTeX toolchain detection.
pub mod latex;
/// ManimGL preview process.
pub mod manimgl;
/// Replay fragment sinks.
pub mod sink;
