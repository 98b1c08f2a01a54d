//! Error types for resolving and rendering jobs

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the browser
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch the browser or open a tab
    #[error("Engine initialization failed: {0}")]
    InitializationError(String),

    /// Failed to load the input document
    #[error("Failed to load URL: {0}")]
    LoadError(String),

    /// Failed to capture the page
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to evaluate a probe script in the page
    #[error("Script execution failed: {0}")]
    ScriptError(String),

    /// Filesystem failure (output directory, PNG write, path resolution)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Problems with the command line. These are reported to the user and the
/// process exits with status 1 before any rendering starts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("Usage: postshot --carousel output_dir/ slide1.html slide2.html ...")]
    CarouselArguments,

    #[error("Unknown format '{name}'. Available: {available}")]
    UnknownFormat { name: String, available: String },

    #[error("--format needs a preset name. Available: {available}")]
    MissingFormat { available: String },

    #[error("Width and height must be integers.")]
    NonIntegerDimensions,

    #[error("Width and height must be greater than zero.")]
    ZeroDimension,

    #[error("Cannot derive a slide name from '{0}'")]
    SlideName(String),
}
