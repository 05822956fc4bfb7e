//! Pipeline error taxonomy
//!
//! Only decoding and output failures (plus a broken OpenCV call or bad
//! configuration) surface to callers. Degenerate geometry never does.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    /// Input missing, unreadable, or not an image
    #[error("cannot decode image {source_name}: {reason}")]
    Decode { source_name: String, reason: String },

    /// Output directory or file could not be written
    #[error("cannot write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output raster could not be encoded
    #[error("cannot encode {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("opencv: {0}")]
    Vision(#[from] opencv::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot load configuration {path:?}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },
}

impl NavError {
    pub(crate) fn decode(source_name: impl Into<String>, reason: impl ToString) -> Self {
        NavError::Decode {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// True for the caller-facing input failure kind
    pub fn is_decode(&self) -> bool {
        matches!(self, NavError::Decode { .. })
    }

    /// True for the caller-facing output failure kinds
    pub fn is_output(&self) -> bool {
        matches!(self, NavError::Io { .. } | NavError::Encode { .. })
    }
}
