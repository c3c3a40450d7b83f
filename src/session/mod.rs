/// Session settings loaded from JSON.
pub mod config;
/// Editor session tying the model, code view and preview together.
pub mod editor;
