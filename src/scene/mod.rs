/// Builder DSL for scenes.
pub mod dsl;
/// Objects, animation steps, scenes and projects.
pub mod model;
