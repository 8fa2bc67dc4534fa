use eframe::glow;
use eframe::glow::HasContext as _;
use tracing::{debug, error};

use mandelglow_core::{ViewState, MAX_ITERATIONS};

use crate::error::GlError;
use crate::rasterizer::{check_driver_error, link_program, BackendKind, Rasterizer, QUAD};

/// Shader sources are compiled at `init` time; the uniform and attribute
/// names below are the wire contract between host code and shader text.
const VERTEX_SRC: &str = include_str!("shaders/mandelbrot.vert.glsl");
const FRAGMENT_SRC: &str = include_str!("shaders/mandelbrot.frag.glsl");

const ATTRIB_POSITION: &str = "position";
const UNIFORM_MAX_ITERATIONS: &str = "max_iterations";
const UNIFORM_ZOOM: &str = "zoom";
const UNIFORM_OFFSET_X: &str = "offset_x";
const UNIFORM_OFFSET_Y: &str = "offset_y";

/// Resolved locations of the fragment shader's parameters.
struct UniformLocations {
    max_iterations: glow::UniformLocation,
    zoom: glow::UniformLocation,
    offset_x: glow::UniformLocation,
    offset_y: glow::UniformLocation,
}

/// The GPU backend: escape-time iteration runs per fragment in the shader,
/// driven by the static quad and the view coefficients as uniforms.
pub(crate) struct HardwareRasterizer {
    program: Option<glow::Program>,
    vao: Option<glow::VertexArray>,
    vbo: Option<glow::Buffer>,
    uniforms: Option<UniformLocations>,
}

impl HardwareRasterizer {
    pub(crate) fn new() -> Self {
        Self {
            program: None,
            vao: None,
            vbo: None,
            uniforms: None,
        }
    }

    fn try_init(&mut self, gl: &glow::Context) -> Result<(), GlError> {
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);

            // Static quad upload.
            let vbo = gl
                .create_buffer()
                .map_err(|detail| GlError::ResourceCreation {
                    what: "vertex buffer",
                    detail,
                })?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD),
                glow::STATIC_DRAW,
            );
            self.vbo = Some(vbo);

            let program = link_program(gl, VERTEX_SRC, FRAGMENT_SRC)?;
            self.program = Some(program);

            let position = gl
                .get_attrib_location(program, ATTRIB_POSITION)
                .ok_or(GlError::MissingAttribute(ATTRIB_POSITION))?;

            let vao = gl
                .create_vertex_array()
                .map_err(|detail| GlError::ResourceCreation {
                    what: "vertex array",
                    detail,
                })?;
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.enable_vertex_attrib_array(position);
            gl.vertex_attrib_pointer_f32(position, 2, glow::FLOAT, false, 0, 0);
            gl.bind_vertex_array(None);
            self.vao = Some(vao);

            let lookup = |name: &'static str| {
                gl.get_uniform_location(program, name)
                    .ok_or(GlError::MissingUniform(name))
            };
            self.uniforms = Some(UniformLocations {
                max_iterations: lookup(UNIFORM_MAX_ITERATIONS)?,
                zoom: lookup(UNIFORM_ZOOM)?,
                offset_x: lookup(UNIFORM_OFFSET_X)?,
                offset_y: lookup(UNIFORM_OFFSET_Y)?,
            });
        }

        check_driver_error(gl)
    }
}

impl Rasterizer for HardwareRasterizer {
    fn kind(&self) -> BackendKind {
        BackendKind::Hardware
    }

    fn init(&mut self, gl: &glow::Context) {
        // A failure here is a startup misconfiguration: log it and leave
        // the backend partially wired. Draws will be skipped.
        if let Err(err) = self.try_init(gl) {
            error!("Hardware rasterizer init failed: {err}");
        } else {
            debug!("Hardware rasterizer initialized");
        }
    }

    fn drawcall(&mut self, gl: &glow::Context, view: &ViewState) -> Result<(), GlError> {
        let (Some(program), Some(vao), Some(uniforms)) =
            (self.program, self.vao, self.uniforms.as_ref())
        else {
            // Partially wired after a failed init.
            return Ok(());
        };

        unsafe {
            gl.disable(glow::BLEND);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(program));
            gl.uniform_1_i32(Some(&uniforms.max_iterations), MAX_ITERATIONS as i32);
            gl.uniform_1_f32(Some(&uniforms.zoom), view.scale);
            gl.uniform_1_f32(Some(&uniforms.offset_x), view.offset_x);
            gl.uniform_1_f32(Some(&uniforms.offset_y), view.offset_y);

            gl.bind_vertex_array(Some(vao));
            gl.draw_arrays(glow::TRIANGLE_FAN, 0, QUAD.len() as i32);

            gl.bind_vertex_array(None);
            gl.use_program(None);
        }

        check_driver_error(gl)
    }

    fn destroy(&mut self, gl: &glow::Context) {
        unsafe {
            gl.use_program(None);
            if let Some(program) = self.program.take() {
                gl.delete_program(program);
            }
            if let Some(vao) = self.vao.take() {
                gl.delete_vertex_array(vao);
            }
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            if let Some(vbo) = self.vbo.take() {
                gl.delete_buffer(vbo);
            }
        }
        self.uniforms = None;
    }
}
