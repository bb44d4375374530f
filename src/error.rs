use thiserror::Error;

/// Errors that can occur while allocating the drawing surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Errors that can occur while exporting the drawing
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Write(#[from] std::io::Error),

    #[error("Invalid export file name: {0:?}")]
    InvalidFileName(String),

    #[error("Browser download failed: {0}")]
    Download(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
