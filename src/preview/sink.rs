use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::ComposerResult;
use crate::preview::export::ensure_parent_dir;

/// Destination for replay fragments consumed by a running preview.
///
/// Ordering contract: the preview executes fragments in push order, and only the latest
/// fragment describes the current scene.
pub trait ReplaySink {
    /// Deliver one replay fragment.
    fn push(&mut self, code: &str) -> ComposerResult<()>;
}

/// Sink writing the replay file polled by the preview script.
///
/// Each push writes a sibling temp file and renames it over the target, so the preview never
/// executes a half-written fragment.
#[derive(Clone, Debug)]
pub struct ReplayFileSink {
    path: PathBuf,
    pushes: u64,
}

impl ReplayFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pushes: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of fragments written so far.
    pub fn pushes(&self) -> u64 {
        self.pushes
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ReplaySink for ReplayFileSink {
    fn push(&mut self, code: &str) -> ComposerResult<()> {
        ensure_parent_dir(&self.path)?;
        let staging = self.staging_path();
        std::fs::write(&staging, code)
            .with_context(|| format!("failed to write replay file '{}'", staging.display()))?;
        std::fs::rename(&staging, &self.path).with_context(|| {
            format!(
                "failed to move replay file into place at '{}'",
                self.path.display()
            )
        })?;
        self.pushes += 1;
        tracing::debug!(path = %self.path.display(), bytes = code.len(), "replay pushed");
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryReplaySink {
    /// Fragments in push order.
    pub(crate) fragments: Vec<String>,
}

impl InMemoryReplaySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured fragments.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn latest(&self) -> Option<&str> {
        self.fragments.last().map(String::as_str)
    }
}

impl ReplaySink for InMemoryReplaySink {
    fn push(&mut self, code: &str) -> ComposerResult<()> {
        self.fragments.push(code.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/sink.rs"]
mod tests;
