//! Errors

use thiserror::Error;

/// Error raised by a caller supplied shader
pub type ShaderError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    /// Shader failed, pixels written before the failure stay written
    #[error("Shader failed: {}", .0)]
    Shader(#[source] ShaderError),
    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Image error: {}", .0)]
    Image(#[from] image::ImageError),
    #[error("IO error: {}", .0)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
