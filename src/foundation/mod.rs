/// Shared value types, constants and coordinate conversion.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
