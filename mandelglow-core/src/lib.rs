pub mod color;
pub mod error;
pub mod escape;
pub mod view;

// Re-export primary types for convenience.
pub use color::{shade, ColorSample, PALETTE_A, PALETTE_B};
pub use error::CoreError;
pub use escape::{escape_time, evaluate, EscapeResult, BAILOUT, MAX_ITERATIONS};
pub use view::ViewState;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
