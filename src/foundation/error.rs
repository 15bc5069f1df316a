/// Convenience result type used across inkline.
pub type InklineResult<T> = Result<T, InklineError>;

/// Error taxonomy for the crate's outer surfaces.
///
/// The animation loop and the border observation callbacks never produce these; they degrade
/// to no-ops instead. Errors only come out of configuration loading, raster export and the CLI.
#[derive(thiserror::Error, Debug)]
pub enum InklineError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing or exporting a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InklineError {
    /// Build an [`InklineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`InklineError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`InklineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
