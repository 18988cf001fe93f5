//! Error types for TDF decoding and texture bundling

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Mip level {0} was not decoded")]
    MissingMip(usize),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bundle output missing: {} (run bundling first)", .0.display())]
    MissingBundle(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bundle_message_names_file() {
        let err = Error::MissingBundle(PathBuf::from("tiles/alpha_map.png"));
        let msg = err.to_string();
        assert!(msg.contains("alpha_map.png"));
        assert!(msg.contains("run bundling first"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
