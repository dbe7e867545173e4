// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types for the carving pipeline and its command line front end.

/// Result type alias using SeamError.
pub type SeamResult<T> = Result<T, SeamError>;

/// Everything that can go wrong while carving.  The first three
/// variants are geometric contract violations raised by the core;
/// the rest come from the edges (files, images, configuration).
#[derive(Debug, thiserror::Error)]
pub enum SeamError {
    #[error("invalid geometry: {width}x{height} image cannot be carved")]
    InvalidGeometry { width: u32, height: u32 },

    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("invalid seam: column {column} in row {row} is outside width {width}")]
    InvalidSeam { row: u32, column: u32, width: u32 },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SeamError {
    pub fn invalid_geometry(width: u32, height: u32) -> Self {
        Self::InvalidGeometry { width, height }
    }

    pub fn dimension_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

/// Fails with `DimensionMismatch` unless both shapes agree.
pub(crate) fn ensure_same_shape(expected: (u32, u32), actual: (u32, u32)) -> SeamResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(SeamError::dimension_mismatch(expected, actual))
    }
}
