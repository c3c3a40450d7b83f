use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::codegen::dialect::Dialect;
use crate::foundation::error::ComposerResult;

/// Editor session settings. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Dialect shown in the code view and used for export.
    pub dialect: Dialect,
    /// Quiet period before a hand edit is parsed, in milliseconds.
    pub debounce_ms: u64,
    /// Draw the frame border in replay fragments.
    pub scene_border: bool,
    pub preview: PreviewOpts,
    pub latex: LatexOpts,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            dialect: Dialect::ManimGl,
            debounce_ms: 500,
            scene_border: true,
            preview: PreviewOpts::default(),
            latex: LatexOpts::default(),
        }
    }
}

impl SessionOpts {
    pub fn from_json_str(s: &str) -> ComposerResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load settings from a JSON file.
    pub fn from_json_file(path: &Path) -> ComposerResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        let opts = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), ?opts, "session config loaded");
        Ok(opts)
    }
}

/// Live preview process settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreviewOpts {
    /// Executable used to launch the preview.
    pub manimgl_bin: String,
    /// File the preview script polls for replay fragments.
    pub replay_path: PathBuf,
    /// Where the preview script itself is written.
    pub script_path: PathBuf,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        let dir = std::env::temp_dir().join("mathcomposer");
        Self {
            manimgl_bin: "manimgl".to_owned(),
            replay_path: dir.join("replay.py"),
            script_path: dir.join("preview_scene.py"),
        }
    }
}

/// LaTeX toolchain lookup settings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LatexOpts {
    /// Directory of a bundled distribution, searched before `PATH`.
    pub bundled_bin_dir: Option<PathBuf>,
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
