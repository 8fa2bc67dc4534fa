pub mod buffer;
pub mod error;
pub mod rasterize;

pub use buffer::PixelBuffer;
pub use error::RenderError;
pub use rasterize::rasterize;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
