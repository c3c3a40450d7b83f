/// Convenience result type used across the composer.
pub type ComposerResult<T> = Result<T, ComposerError>;

/// Top-level error taxonomy used by the scene model and its IO boundaries.
///
/// The parser and generator have no error path: parsing failures are expressed as omission and
/// generation is total. Everything here comes from model mutations or external collaborators.
#[derive(thiserror::Error, Debug)]
pub enum ComposerError {
    /// A scene model mutation would break one of its invariants.
    #[error("validation error: {0}")]
    Validation(String),

    /// Code and scene could not be brought back in sync.
    #[error("sync error: {0}")]
    Sync(String),

    /// The preview process or replay channel failed.
    #[error("preview error: {0}")]
    Preview(String),

    /// Errors when serializing or deserializing project files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComposerError {
    /// Build a [`ComposerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ComposerError::Sync`] value.
    pub fn sync(msg: impl Into<String>) -> Self {
        Self::Sync(msg.into())
    }

    /// Build a [`ComposerError::Preview`] value.
    pub fn preview(msg: impl Into<String>) -> Self {
        Self::Preview(msg.into())
    }

    /// Build a [`ComposerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ComposerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
