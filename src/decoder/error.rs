use std::path::PathBuf;
use thiserror::Error;

/// Errors from turning scanner input into a usable payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to open image '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("Scanned payload is not JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("Scanned payload has no usable 'id' field")]
    MissingId,
}
