use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ComposerError, ComposerResult};
use crate::session::config::LatexOpts;

/// Executables a bundled distribution needs for canvas rendering.
const REQUIRED_TOOLS: &[&str] = &["latex", "dvipng", "dvipdfmx"];

/// Where a usable `latex` was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatexStatus {
    /// The configured bundled distribution.
    Bundled(PathBuf),
    /// A system installation found on `PATH`.
    System(PathBuf),
    Missing,
}

impl LatexStatus {
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Missing)
    }
}

/// Lookup state for the LaTeX toolchain.
///
/// Detection runs once and is cached. A failed render can demote the cached result with
/// [`mark_unavailable`](Self::mark_unavailable); an installer run should call
/// [`reset`](Self::reset) so the next query searches again.
#[derive(Clone, Debug)]
pub struct LatexToolchain {
    opts: LatexOpts,
    status: Option<LatexStatus>,
}

impl LatexToolchain {
    pub fn new(opts: LatexOpts) -> Self {
        Self { opts, status: None }
    }

    /// Cached result of the last detection, if any.
    pub fn status(&self) -> Option<&LatexStatus> {
        self.status.as_ref()
    }

    /// Search the bundled directory, then `PATH`. Cached until [`reset`](Self::reset).
    pub fn detect(&mut self) -> &LatexStatus {
        if self.status.is_none() {
            let found = self.search();
            tracing::debug!(status = ?found, "latex toolchain detected");
            self.status = Some(found);
        }
        self.status.get_or_insert(LatexStatus::Missing)
    }

    pub fn is_available(&mut self) -> bool {
        self.detect().is_available()
    }

    /// Record that rendering failed, so callers fall back until the next reset.
    pub fn mark_unavailable(&mut self) {
        tracing::warn!("latex toolchain marked unavailable");
        self.status = Some(LatexStatus::Missing);
    }

    /// Forget the cached result.
    pub fn reset(&mut self) {
        self.status = None;
    }

    /// `true` when the bundled directory holds every tool needed for rendering.
    pub fn bundled_is_complete(&self) -> bool {
        self.opts
            .bundled_bin_dir
            .as_deref()
            .is_some_and(|dir| REQUIRED_TOOLS.iter().all(|t| dir.join(exe(t)).is_file()))
    }

    /// `PATH` value for child processes, with the bundled directory in front when present.
    pub fn path_env(&self) -> ComposerResult<OsString> {
        let current = std::env::var_os("PATH").unwrap_or_default();
        let Some(dir) = self.bundled_dir() else {
            return Ok(current);
        };
        let mut paths = vec![dir.to_path_buf()];
        paths.extend(std::env::split_paths(&current).filter(|p| p != dir));
        std::env::join_paths(paths)
            .map_err(|e| ComposerError::preview(format!("cannot build PATH for latex: {e}")))
    }

    fn bundled_dir(&self) -> Option<&Path> {
        self.opts
            .bundled_bin_dir
            .as_deref()
            .filter(|dir| dir.join(exe("latex")).is_file())
    }

    fn search(&self) -> LatexStatus {
        if let Some(dir) = self.bundled_dir() {
            return LatexStatus::Bundled(dir.join(exe("latex")));
        }
        match find_on_path("latex") {
            Some(path) => LatexStatus::System(path),
            None => LatexStatus::Missing,
        }
    }
}

fn exe(name: &str) -> String {
    format!("{name}{}", std::env::consts::EXE_SUFFIX)
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(exe(name)))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
#[path = "../../tests/unit/preview/latex.rs"]
mod tests;
