/// Result alias used by every fallible operation in this crate.
pub type TrailResult<T> = Result<T, TrailError>;

/// Error type for configuration, rendering and host I/O failures.
///
/// A missing or empty raster buffer is not an error: the compositor treats it as the normal
/// pre-layout state and skips the frame.
#[derive(thiserror::Error, Debug)]
pub enum TrailError {
    /// Rejected configuration or surface geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure while compositing or presenting a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Failure while writing frames to an external sink.
    #[error("io error: {0}")]
    Io(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrailError {
    /// Build a [`TrailError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrailError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TrailError::Io`].
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
