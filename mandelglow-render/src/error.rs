use thiserror::Error;

/// Errors originating from the software rasterization pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid frame dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Core(#[from] mandelglow_core::CoreError),
}
