//! Error types for the plotcam pipeline.
//!
//! Geometry failures (singular circle fits, exhausted trace walks) are not
//! errors: they are recovered locally by the fitter and the tracer. Only
//! malformed input at the pipeline boundary is surfaced to the caller.

use std::io;
use thiserror::Error;

/// Errors that can occur while converting an image to a toolpath.
#[derive(Error, Debug)]
pub enum PlotCamError {
    /// The raster has a zero width or height.
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// The pixel buffer does not match the declared dimensions.
    #[error("Pixel buffer length mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// The input image could not be decoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for plotcam operations.
pub type PlotCamResult<T> = Result<T, PlotCamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_display() {
        let err = PlotCamError::InvalidDimensions {
            width: 0,
            height: 32,
        };
        assert_eq!(err.to_string(), "Invalid raster dimensions: 0x32");
    }

    #[test]
    fn test_pixel_count_mismatch_display() {
        let err = PlotCamError::PixelCountMismatch {
            expected: 25,
            actual: 24,
        };
        assert_eq!(
            err.to_string(),
            "Pixel buffer length mismatch: expected 25, got 24"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PlotCamError = io_err.into();
        assert!(matches!(err, PlotCamError::Io(_)));
    }
}
