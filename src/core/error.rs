//! Error types for the Isofield engine

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("scene error: {0}")]
    Scene(String),

    #[error("corrupt lookup table: {0}")]
    Table(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("image encode error: {0}")]
    Image(#[from] image::ImageError),
}
