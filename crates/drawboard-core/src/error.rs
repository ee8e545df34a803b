//! Error types for the drawing engine.

use crate::surface::SurfaceError;
use thiserror::Error;

/// Engine errors.
#[derive(Debug, Error)]
pub enum DrawboardError {
    /// Missing or inconsistent construction input.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Malformed custom-draw registration.
    #[error("Invalid custom draw: {0}")]
    Validation(String),
    /// Empty or unparsable path data.
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    /// The rendering surface rejected an operation.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Result type for engine operations.
pub type DrawboardResult<T> = Result<T, DrawboardError>;
