//! Error types for photo loading and landmark persistence.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading a photo or sidecar file
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sidecar JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The photo bytes could not be decoded
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// Malformed `data:` URI
    #[error("invalid data URI: {message}")]
    DataUri { message: String },

    #[error("gui error: {0}")]
    Gui(#[from] eframe::Error),
}

/// A point argument that is not `X,Y`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid point '{input}', expected X,Y")]
pub struct ParsePointError {
    pub input: String,
}

pub type Result<T> = std::result::Result<T, Error>;
