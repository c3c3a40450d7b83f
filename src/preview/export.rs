use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::ComposerResult;

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> ComposerResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write generated script text to `path`, creating parent directories.
pub fn export_script(path: &Path, code: &str) -> ComposerResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, code)
        .with_context(|| format!("failed to write script '{}'", path.display()))?;
    tracing::info!(path = %path.display(), bytes = code.len(), "script exported");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/preview/export.rs"]
mod tests;
