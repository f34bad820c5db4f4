//! Error types for pcdebug

use thiserror::Error;

/// Main error type for pcdebug operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Surface state error: {0}")]
    SurfaceState(String),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for pcdebug operations
pub type Result<T> = std::result::Result<T, Error>;
