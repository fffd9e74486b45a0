//! Error types for frame processing.
//!
//! Failures are structural only: a frame whose shape does not describe an
//! RGBA raster, or a filter-mode name nobody knows. Threshold and kernel
//! options are never errors.

use thiserror::Error;

/// Error type for frame processing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Width or height is zero, or the pixel count overflows `usize`.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Byte buffer does not hold exactly `width * height * 4` values.
    #[error("buffer length mismatch for {width}x{height} RGBA: expected {expected}, got {actual}")]
    BufferLength {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Array does not carry 4 interleaved channels.
    #[error("expected 4 channels (RGBA), got {0}")]
    ChannelCount(usize),

    /// Filter mode name not recognized.
    #[error("unknown filter mode: {0:?} (expected raw, grayscale, sobel or canny)")]
    UnknownFilterMode(String),
}

/// Result type for frame processing.
pub type PipelineResult<T> = Result<T, PipelineError>;
