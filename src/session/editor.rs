use std::path::Path;
use std::time::Instant;

use crate::{
    codegen::dialect::Dialect,
    codegen::generator::{ReplayOpts, ScriptOpts, generate_project_script, generate_replay},
    foundation::error::{ComposerError, ComposerResult},
    parse::parser::parse_code,
    preview::export::export_script,
    preview::manimgl::ManimGlPreview,
    preview::sink::{ReplayFileSink, ReplaySink},
    scene::model::{Project, Scene},
    session::config::SessionOpts,
    sync::debounce::Debouncer,
    sync::reconcile::{ProjectSyncReport, reconcile_project},
};

/// The state behind one editor window: the project, the scene on the canvas, and the
/// hand-edited code waiting to be synced back.
///
/// All calls are expected on one control thread; preview processes run out of process.
#[derive(Debug)]
pub struct EditorSession {
    project: Project,
    active: usize,
    opts: SessionOpts,
    pending: Debouncer<String>,
}

impl EditorSession {
    /// Session over a project holding one empty scene.
    pub fn new(opts: SessionOpts) -> Self {
        Self::from_parts(Project::with_default_scene(), opts)
    }

    /// Session over an existing project; an empty project gets one empty scene.
    pub fn with_project(mut project: Project, opts: SessionOpts) -> ComposerResult<Self> {
        project.validate()?;
        if project.is_empty() {
            project = Project::with_default_scene();
        }
        Ok(Self::from_parts(project, opts))
    }

    fn from_parts(project: Project, opts: SessionOpts) -> Self {
        let pending = Debouncer::from_millis(opts.debounce_ms);
        Self {
            project,
            active: 0,
            opts,
            pending,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn set_active(&mut self, index: usize) -> ComposerResult<()> {
        if index >= self.project.len() {
            return Err(ComposerError::validation(format!(
                "scene index {index} out of range (len {})",
                self.project.len()
            )));
        }
        self.active = index;
        Ok(())
    }

    /// Scene shown on the canvas.
    pub fn scene(&self) -> &Scene {
        &self.project.scenes()[self.active]
    }

    /// Mutable access for canvas and property-panel edits.
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.project.scene_mut(self.active)
    }

    /// Add a scene and make it active.
    pub fn add_scene(&mut self, scene: Scene) -> ComposerResult<usize> {
        let index = self.project.add_scene(scene)?;
        self.active = index;
        Ok(index)
    }

    pub fn dialect(&self) -> Dialect {
        self.opts.dialect
    }

    /// Switch the code view dialect. Pending edits are synced first so none are lost.
    pub fn set_dialect(&mut self, dialect: Dialect) -> ComposerResult<bool> {
        if self.opts.dialect == dialect {
            return Ok(false);
        }
        self.flush()?;
        self.opts.dialect = dialect;
        tracing::debug!(dialect = dialect.label(), "dialect switched");
        Ok(true)
    }

    /// The whole document as the code view shows it.
    pub fn code(&self) -> String {
        generate_project_script(&self.project, &ScriptOpts::new(self.opts.dialect))
    }

    /// Record a hand edit; it is parsed once the debounce period passes without another.
    pub fn on_code_edited(&mut self, text: impl Into<String>, now: Instant) {
        self.pending.schedule(text.into(), now);
    }

    pub fn has_pending_edit(&self) -> bool {
        self.pending.is_pending()
    }

    /// Sync the pending edit if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> ComposerResult<Option<ProjectSyncReport>> {
        match self.pending.poll(now) {
            Some(text) => self.apply(&text).map(Some),
            None => Ok(None),
        }
    }

    /// Sync the pending edit immediately, e.g. when the user leaves the code tab.
    pub fn flush(&mut self) -> ComposerResult<Option<ProjectSyncReport>> {
        match self.pending.cancel() {
            Some(text) => self.apply(&text).map(Some),
            None => Ok(None),
        }
    }

    /// Parse `text` and merge it into the project now, superseding any pending edit.
    pub fn sync_now(&mut self, text: &str) -> ComposerResult<ProjectSyncReport> {
        self.pending.cancel();
        self.apply(text)
    }

    fn apply(&mut self, text: &str) -> ComposerResult<ProjectSyncReport> {
        let parsed = parse_code(text);
        let report = reconcile_project(&mut self.project, parsed.as_deref())?;
        if !report.is_noop() {
            tracing::info!(
                scenes = report.scenes.len(),
                added = report.added.len(),
                "code synced into scene model"
            );
        }
        Ok(report)
    }

    /// Replay fragment for the active scene, in the preview's dialect.
    pub fn replay_code(&self) -> String {
        generate_replay(
            self.scene(),
            &ReplayOpts {
                dialect: Dialect::ManimGl,
                scene_border: self.opts.scene_border,
            },
        )
    }

    /// Push the active scene into a running preview.
    pub fn push_preview(&self, sink: &mut dyn ReplaySink) -> ComposerResult<()> {
        sink.push(&self.replay_code()).inspect_err(|e| {
            tracing::warn!(error = %e, "replay push failed");
        })
    }

    /// Sink for the replay file the configured preview polls.
    pub fn replay_sink(&self) -> ReplayFileSink {
        ReplayFileSink::new(&self.opts.preview.replay_path)
    }

    /// Launch a preview window on the active scene.
    pub fn start_preview(&self) -> ComposerResult<ManimGlPreview> {
        ManimGlPreview::spawn(self.scene(), &self.opts.preview)
    }

    /// Write the current document to `path`, syncing pending edits first.
    pub fn export(&mut self, path: &Path) -> ComposerResult<()> {
        self.flush()?;
        export_script(path, &self.code())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
