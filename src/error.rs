//! Error types for the conversion pipeline.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::raster::PixelFormat;

/// Errors that can occur while converting an animation.
///
/// Every variant is fatal for the run. The pipeline is deterministic, so
/// none of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum ReelError {
    #[error("Unknown color mode '{value}'. Available modes: grayscale, 16-color, 256-color, truecolor")]
    UnknownColorMode {
        /// The value that failed to parse
        value: String,
    },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Frame {frame} is {format:?}, expected 3-channel RGB")]
    UnsupportedFormat {
        /// Index of the offending frame in source order
        frame: usize,
        format: PixelFormat,
    },

    #[error("Frame {frame} holds {actual} bytes, expected {expected} for its dimensions")]
    FrameSizeMismatch {
        frame: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to open '{path}': {source}")]
    SourceOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode source animation: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Source animation contains no frames")]
    EmptyAnimation,

    #[error("Failed to write output '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize animation: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReelError {
    /// True for errors raised by configuration validation, before any frame
    /// has been touched.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ReelError::UnknownColorMode { .. } | ReelError::InvalidOption(_) | ReelError::Config(_)
        )
    }

    /// True for errors caused by a frame that is not 3-channel RGB.
    pub fn is_input_shape(&self) -> bool {
        matches!(
            self,
            ReelError::UnsupportedFormat { .. } | ReelError::FrameSizeMismatch { .. }
        )
    }
}

pub type Result<T, E = ReelError> = std::result::Result<T, E>;
