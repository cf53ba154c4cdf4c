//! Raster pipeline error types.

use thiserror::Error;

/// Result type for raster operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors that can occur in the raster pipeline.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Resource loading or decoding failed.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// The compositing filter failed.
    #[error("Filter failed: {0}")]
    Filter(String),

    /// Export rendering or encoding failed.
    #[error("Export failed: {0}")]
    Export(String),
}
