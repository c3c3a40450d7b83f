use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::codegen::generator::generate_preview_script;
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::preview::export::export_script;
use crate::scene::model::Scene;
use crate::session::config::PreviewOpts;

/// A running ManimGL preview window.
///
/// The process renders the scene once, then keeps polling the replay file written by a
/// [`ReplayFileSink`](crate::ReplayFileSink) with the same path.
pub struct ManimGlPreview {
    scene: String,
    script_path: PathBuf,
    replay_path: PathBuf,
    child: Option<Child>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl ManimGlPreview {
    /// Write the preview script for `scene` and launch the preview binary on it.
    pub fn spawn(scene: &Scene, opts: &PreviewOpts) -> ComposerResult<Self> {
        let script = generate_preview_script(scene, &opts.replay_path);
        export_script(&opts.script_path, &script)?;

        let mut cmd = Command::new(&opts.manimgl_bin);
        cmd.arg(&opts.script_path)
            .arg(scene.name())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            ComposerError::preview(format!(
                "failed to spawn '{}' (is it installed and on PATH?): {e}",
                opts.manimgl_bin
            ))
        })?;

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ComposerError::preview("failed to open preview stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::info!(scene = scene.name(), pid = child.id(), "preview started");
        Ok(Self {
            scene: scene.name().to_owned(),
            script_path: opts.script_path.clone(),
            replay_path: opts.replay_path.clone(),
            child: Some(child),
            stderr_drain: Some(stderr_drain),
        })
    }

    pub fn scene(&self) -> &str {
        &self.scene
    }

    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    pub fn replay_path(&self) -> &Path {
        &self.replay_path
    }

    /// `true` while the preview process has not exited.
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(Ok(Some(status))) => {
                tracing::debug!(%status, "preview exited");
                false
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "failed to query preview process");
                false
            }
            None => false,
        }
    }

    /// Block until the preview exits on its own; fails with its stderr on a non-zero exit.
    pub fn wait(mut self) -> ComposerResult<()> {
        let mut child = self
            .child
            .take()
            .ok_or_else(|| ComposerError::preview("preview already stopped"))?;
        let status = child
            .wait()
            .map_err(|e| ComposerError::preview(format!("failed to wait for preview: {e}")))?;
        let stderr_bytes = self.join_drain()?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(ComposerError::preview(format!(
                "preview exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        Ok(())
    }

    /// Kill the preview process if it is still alive.
    pub fn stop(&mut self) -> ComposerResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        if matches!(child.try_wait(), Ok(None)) {
            child
                .kill()
                .map_err(|e| ComposerError::preview(format!("failed to stop preview: {e}")))?;
        }
        if let Err(e) = child.wait() {
            tracing::warn!(scene = %self.scene, error = %e, "failed to reap preview process");
        }
        self.join_drain()?;
        tracing::info!(scene = %self.scene, "preview stopped");
        Ok(())
    }

    fn join_drain(&mut self) -> ComposerResult<Vec<u8>> {
        match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| ComposerError::preview("preview stderr drain thread panicked"))?
                .map_err(|e| ComposerError::preview(format!("preview stderr read failed: {e}"))),
            None => Ok(Vec::new()),
        }
    }
}

impl Drop for ManimGlPreview {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            tracing::warn!(error = %e, "preview cleanup failed");
        }
    }
}

/// Return `true` when `bin` can be invoked (e.g. `manimgl` from `PATH`).
pub fn is_manimgl_on_path(bin: &str) -> bool {
    Command::new(bin)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/preview/manimgl.rs"]
mod tests;
