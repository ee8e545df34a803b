//! Render errors.

use drawboard_core::SurfaceError;
use thiserror::Error;

/// Errors raised while loading, rasterizing or encoding images.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image not found: {0}")]
    NotFound(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),
    #[error("Base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PNG encode failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

impl From<RenderError> for SurfaceError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::NotFound(src) => SurfaceError::NotFound(src),
            other => SurfaceError::Image(other.to_string()),
        }
    }
}
