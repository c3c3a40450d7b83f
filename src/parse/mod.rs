//! Script text back to scene descriptions.
//!
//! Parsing is line-oriented and tolerant: the first pattern that claims a line wins, and
//! anything unrecognized is skipped.

/// Scene splitting and directive application.
pub mod parser;
pub(crate) mod patterns;
