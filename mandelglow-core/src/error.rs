use thiserror::Error;

/// Errors originating from the core navigation/evaluation types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid scale: {0} (must be positive and finite)")]
    InvalidScale(f32),
}
