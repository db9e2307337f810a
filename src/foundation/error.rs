use std::path::{Path, PathBuf};

/// Convenience result type used across mvscope.
pub type MvResult<T> = Result<T, MvError>;

/// Top-level error taxonomy used by the library APIs.
///
/// Every variant is fatal for the invocation that produced it. Per-cell numeric coercion
/// failures are not errors; they become [`Cell::Missing`](crate::Cell::Missing).
#[derive(thiserror::Error, Debug)]
pub enum MvError {
    /// An input path does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Malformed delimited input or text table.
    #[error("parse error: {0}")]
    Parse(String),

    /// A required column is absent from the input header.
    #[error("missing required column: '{0}'")]
    MissingColumn(String),

    /// Bad arguments, such as an inverted frame range.
    #[error("argument error: {0}")]
    Argument(String),

    /// Invalid configuration or encoder settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// The rasterizer cannot handle the requested canvas.
    #[error("render error: {0}")]
    Render(String),

    /// ffmpeg/ffprobe failed or produced unusable output.
    #[error("media error: {0}")]
    Media(String),

    /// The external benchmark executable failed.
    #[error("benchmark error: {0}")]
    Benchmark(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MvError {
    /// Build a [`MvError::FileNotFound`] value.
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::FileNotFound(path.as_ref().to_path_buf())
    }

    /// Build a [`MvError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`MvError::MissingColumn`] value.
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn(name.into())
    }

    /// Build a [`MvError::Argument`] value.
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// Build a [`MvError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MvError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MvError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`MvError::Benchmark`] value.
    pub fn benchmark(msg: impl Into<String>) -> Self {
        Self::Benchmark(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
