//! Error types for the fallible loaders.
//!
//! Neither error is fatal to the game: the composition root logs them and falls
//! back to a walkable field or to default tunables.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaskError {
    #[error("failed to decode obstacle mask: {0}")]
    Decode(#[from] image::ImageError),

    #[error("mask data holds {actual} bytes, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tunables: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid tunables: {0}")]
    Invalid(String),
}
