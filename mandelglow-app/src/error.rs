use thiserror::Error;

/// Errors surfaced by the rasterizer backends.
///
/// Only [`GlError::Driver`] is fatal: a corrupted GL context has no recovery
/// path, so the frame loop shuts down. Everything else is logged and the
/// backend keeps running, possibly partially wired.
#[derive(Debug, Error)]
pub enum GlError {
    #[error("failed to create {what}: {detail}")]
    ResourceCreation {
        what: &'static str,
        detail: String,
    },

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile {
        stage: &'static str,
        log: String,
    },

    #[error("shader program failed to link: {log}")]
    ProgramLink { log: String },

    #[error("could not bind attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("could not bind uniform `{0}`")]
    MissingUniform(&'static str),

    #[error("OpenGL driver error 0x{0:04x}")]
    Driver(u32),

    #[error(transparent)]
    Raster(#[from] mandelglow_render::RenderError),
}

impl GlError {
    /// Whether this error should terminate the frame loop.
    pub(crate) fn is_fatal(&self) -> bool {
        matches!(self, GlError::Driver(_))
    }
}
