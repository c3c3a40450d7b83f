//! Mathcomposer keeps a visual scene and its animation script in sync.
//!
//! A scene is a set of named math-expression objects plus an ordered list of animation steps.
//! The engine turns it into a script for one of two dialects of the Manim animation library,
//! reads hand-edited scripts back, and merges the result into the live scene.
//!
//! # Sync loop
//!
//! 1. **Generate**: `Scene -> String` ([`generate_script`], [`generate_project_script`])
//! 2. **Parse**: `String -> Option<Vec<ParsedScene>>` ([`parse_code`]); `None` means the text
//!    has no scene class and must not change anything
//! 3. **Reconcile**: `ParsedScene -> Scene` mutations ([`reconcile_scene`],
//!    [`reconcile_project`]); reconciling the same parse twice changes nothing
//!
//! Generation and parsing never fail. Model mutations that would break an invariant return
//! [`ComposerError::Validation`].
//!
//! [`EditorSession`] wires the loop to a debounced code view, a replay channel into a running
//! ManimGL preview, and script export.
#![forbid(unsafe_code)]

mod codegen;
mod foundation;
mod parse;
mod preview;
mod scene;
mod session;
mod sync;

pub use codegen::dialect::{Dialect, canonical_effect_name, effect_renames};
pub use codegen::generator::{
    ReplayOpts, ScriptOpts, generate_body, generate_preview_script, generate_project_script,
    generate_replay, generate_script,
};
pub use foundation::core::{
    CANVAS_UNITS_PER_SCENE_UNIT, DEFAULT_DURATION, DEFAULT_EASING, DEFAULT_FONT_SIZE,
    DEFAULT_SCENE_NAME, DURATION_EPSILON, HexColor, MIN_FONT_SIZE, ORIGIN_EPSILON,
    POSITION_EPSILON, Point, Vec2, canvas_to_scene, durations_match, positions_match,
    scene_to_canvas,
};
pub use foundation::error::{ComposerError, ComposerResult};
pub use parse::parser::{ParsedObject, ParsedScene, parse_code};
pub use preview::export::{ensure_parent_dir, export_script};
pub use preview::latex::{LatexStatus, LatexToolchain};
pub use preview::manimgl::{ManimGlPreview, is_manimgl_on_path};
pub use preview::sink::{InMemoryReplaySink, ReplayFileSink, ReplaySink};
pub use scene::dsl::SceneBuilder;
pub use scene::model::{
    AnimationStep, ObjectKind, Project, Scene, SceneObject, StepKind, is_identifier,
};
pub use session::config::{LatexOpts, PreviewOpts, SessionOpts};
pub use session::editor::EditorSession;
pub use sync::debounce::Debouncer;
pub use sync::reconcile::{
    ObjectField, ProjectSyncReport, SyncChange, SyncReport, reconcile_project, reconcile_scene,
};
