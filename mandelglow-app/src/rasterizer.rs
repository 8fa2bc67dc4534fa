use bytemuck::{Pod, Zeroable};
use eframe::glow;

use mandelglow_core::ViewState;

use crate::error::GlError;
use crate::hardware::HardwareRasterizer;
use crate::software::SoftwareRasterizer;

/// A 2-D position of the full-screen quad, laid out for GL vertex upload.
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct Vertex {
    pub x: f32,
    pub y: f32,
}

/// The four corners of the unit quad spanning `[-1, 1] × [-1, 1]`, shared by
/// both backends and drawn as a triangle fan.
pub(crate) const QUAD: [Vertex; 4] = [
    Vertex { x: 1.0, y: 1.0 },
    Vertex { x: 1.0, y: -1.0 },
    Vertex { x: -1.0, y: -1.0 },
    Vertex { x: -1.0, y: 1.0 },
];

/// Which rendering strategy a backend implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BackendKind {
    /// Escape-time iteration per fragment, on the GPU.
    Hardware,
    /// Escape-time iteration per pixel on the CPU, uploaded as a texture.
    Software,
}

impl BackendKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Hardware => "Hardware",
            Self::Software => "Software",
        }
    }

    /// The kind a toggle switches to.
    pub(crate) fn other(self) -> Self {
        match self {
            Self::Hardware => Self::Software,
            Self::Software => Self::Hardware,
        }
    }

    /// Construct an uninitialized backend of this kind.
    ///
    /// `resolution` is the software path's fixed render target size; the
    /// hardware path rasterizes at whatever the surface resolution is.
    pub(crate) fn create(self, resolution: [u32; 2]) -> Box<dyn Rasterizer> {
        match self {
            Self::Hardware => Box::new(HardwareRasterizer::new()),
            Self::Software => Box::new(SoftwareRasterizer::new(resolution[0], resolution[1])),
        }
    }
}

/// One of the two interchangeable rendering strategies.
///
/// Lifecycle: constructed cold, `init` once a GL context exists, one
/// `drawcall` per frame, `destroy` before the backend is dropped or
/// swapped out. `destroy` is idempotent; `drawcall` on a backend whose
/// `init` failed partway is a silent no-op rather than an error.
pub(crate) trait Rasterizer: Send {
    fn kind(&self) -> BackendKind;

    /// Acquire GL resources. Failures are logged, not returned: a broken
    /// shader leaves the backend partially wired and draws are skipped.
    fn init(&mut self, gl: &glow::Context);

    /// Render one frame from the given coefficients.
    fn drawcall(&mut self, gl: &glow::Context, view: &ViewState) -> Result<(), GlError>;

    /// Release GL resources. Safe to call on a never-initialized backend.
    fn destroy(&mut self, gl: &glow::Context);
}

/// Compile both shader stages and link them into a program.
///
/// Compile and link status failures are logged and linking proceeds with
/// whatever objects resulted — the program may be broken, which shows up
/// later as missing attribute/uniform locations. Only resource-creation
/// failures abort.
pub(crate) fn link_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, GlError> {
    use glow::HasContext as _;

    unsafe {
        let program = gl
            .create_program()
            .map_err(|detail| GlError::ResourceCreation {
                what: "program",
                detail,
            })?;

        let stages = [
            (glow::VERTEX_SHADER, "vertex", vertex_src),
            (glow::FRAGMENT_SHADER, "fragment", fragment_src),
        ];

        let mut shaders = Vec::with_capacity(stages.len());
        for (stage_type, stage_name, source) in stages {
            let shader = gl
                .create_shader(stage_type)
                .map_err(|detail| GlError::ResourceCreation {
                    what: "shader",
                    detail,
                })?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let err = GlError::ShaderCompile {
                    stage: stage_name,
                    log: gl.get_shader_info_log(shader),
                };
                tracing::warn!("{err}");
            }
            gl.attach_shader(program, shader);
            shaders.push(shader);
        }

        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let err = GlError::ProgramLink {
                log: gl.get_program_info_log(program),
            };
            tracing::warn!("{err}");
        }

        // Shader objects are owned by the program once linked.
        for shader in shaders {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }

        Ok(program)
    }
}

/// Map a non-zero `glGetError` code to the fatal driver error.
pub(crate) fn check_driver_error(gl: &glow::Context) -> Result<(), GlError> {
    use glow::HasContext as _;

    let code = unsafe { gl.get_error() };
    if code == glow::NO_ERROR {
        Ok(())
    } else {
        Err(GlError::Driver(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_spans_unit_square() {
        for v in QUAD {
            assert_eq!(v.x.abs(), 1.0);
            assert_eq!(v.y.abs(), 1.0);
        }
        // All four corners are distinct.
        for (i, a) in QUAD.iter().enumerate() {
            for b in QUAD.iter().skip(i + 1) {
                assert!(a.x != b.x || a.y != b.y);
            }
        }
    }

    #[test]
    fn quad_bytes_are_plain_floats() {
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD);
        assert_eq!(bytes.len(), 4 * 2 * std::mem::size_of::<f32>());
    }

    #[test]
    fn kind_toggle_round_trips() {
        assert_eq!(BackendKind::Hardware.other(), BackendKind::Software);
        assert_eq!(BackendKind::Software.other(), BackendKind::Hardware);
        assert_eq!(BackendKind::Hardware.other().other(), BackendKind::Hardware);
    }
}
