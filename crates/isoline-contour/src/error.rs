//! Error types for isoline-contour

use thiserror::Error;

/// Errors that can occur while building or running the contour pipeline
#[derive(Debug, Error)]
pub enum ContourError {
    /// Core library error (allocation, dimensions)
    #[error("core error: {0}")]
    Core(#[from] isoline_core::Error),

    /// Raster or stencil I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] isoline_io::IoError),

    /// Resampling failed
    #[error("transform error: {0}")]
    Transform(#[from] isoline_transform::TransformError),

    /// Task count must be at least one
    #[error("invalid task count: {0}")]
    InvalidTaskCount(usize),

    /// Step must be positive
    #[error("invalid sampling step: {0}")]
    InvalidStep(u32),

    /// Wrong number of stencils
    #[error("expected 16 stencils, got {0}")]
    StencilCount(usize),

    /// A stencil's size disagrees with the others or with the sampling step
    #[error("stencil {index} is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    StencilSize {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A worker thread could not be spawned
    #[error("failed to launch task {task}: {source}")]
    TaskLaunch {
        task: usize,
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked
    #[error("task {0} panicked")]
    TaskJoin(usize),

    /// The phase barrier was torn down while a task waited on it
    #[error("phase barrier aborted")]
    BarrierAborted,
}

/// Result type for contour operations
pub type ContourResult<T> = Result<T, ContourError>;
