use eframe::glow;
use eframe::glow::HasContext as _;
use tracing::{debug, error};

use mandelglow_core::ViewState;
use mandelglow_render::rasterize;

use crate::error::GlError;
use crate::rasterizer::{check_driver_error, link_program, BackendKind, Rasterizer, QUAD};

const VERTEX_SRC: &str = include_str!("shaders/blit.vert.glsl");
const FRAGMENT_SRC: &str = include_str!("shaders/blit.frag.glsl");

const ATTRIB_POSITION: &str = "position";
const UNIFORM_FRAME: &str = "frame";

/// The CPU backend: the escape-time loop runs per pixel across rayon
/// workers into a float buffer, which is uploaded as a one-frame texture
/// and stretched over the viewport by a trivial blit shader.
///
/// The render resolution is fixed at construction and independent of the
/// surface size; the texture upload scales to fit.
pub(crate) struct SoftwareRasterizer {
    width: u32,
    height: u32,
    program: Option<glow::Program>,
    vao: Option<glow::VertexArray>,
    vbo: Option<glow::Buffer>,
    sampler: Option<glow::UniformLocation>,
}

impl SoftwareRasterizer {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            program: None,
            vao: None,
            vbo: None,
            sampler: None,
        }
    }

    fn try_init(&mut self, gl: &glow::Context) -> Result<(), GlError> {
        unsafe {
            gl.clear_color(1.0, 1.0, 1.0, 1.0);

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

            self.sampler = Some(
                gl.get_uniform_location(program, UNIFORM_FRAME)
                    .ok_or(GlError::MissingUniform(UNIFORM_FRAME))?,
            );
        }

        check_driver_error(gl)
    }
}

impl Rasterizer for SoftwareRasterizer {
    fn kind(&self) -> BackendKind {
        BackendKind::Software
    }

    fn init(&mut self, gl: &glow::Context) {
        if let Err(err) = self.try_init(gl) {
            error!("Software rasterizer init failed: {err}");
        } else {
            debug!(
                width = self.width,
                height = self.height,
                "Software rasterizer initialized"
            );
        }
    }

    fn drawcall(&mut self, gl: &glow::Context, view: &ViewState) -> Result<(), GlError> {
        let (Some(program), Some(vao), Some(sampler)) =
            (self.program, self.vao, self.sampler.as_ref())
        else {
            return Ok(());
        };

        // The rayon join inside `rasterize` guarantees every pixel is
        // written before the buffer reaches the GPU.
        let buffer = rasterize(view, self.width, self.height)?;

        unsafe {
            gl.disable(glow::BLEND);
            gl.clear_color(1.0, 1.0, 1.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            let texture = gl
                .create_texture()
                .map_err(|detail| GlError::ResourceCreation {
                    what: "texture",
                    detail,
                })?;
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA32F as i32,
                buffer.width as i32,
                buffer.height as i32,
                0,
                glow::RGBA,
                glow::FLOAT,
                glow::PixelUnpackData::Slice(Some(bytemuck::cast_slice(&buffer.data))),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );

            gl.use_program(Some(program));
            gl.uniform_1_i32(Some(sampler), 0);
            gl.bind_vertex_array(Some(vao));
            gl.draw_arrays(glow::TRIANGLE_FAN, 0, QUAD.len() as i32);

            gl.bind_vertex_array(None);
            gl.use_program(None);

            // Nothing persists between frames.
            gl.bind_texture(glow::TEXTURE_2D, None);
            gl.delete_texture(texture);
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
        self.sampler = None;
    }
}
