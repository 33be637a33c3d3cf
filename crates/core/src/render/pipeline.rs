//! Scene pipeline assembly and the per-frame draw.
//!
//! `ScenePipeline::build` turns a [`SceneConfig`] into GPU state once:
//! program, mesh, optional placeholder texture, optional capture buffer,
//! and the constant view-projection product. After that, [`frame`] is a
//! pure function of the host timestamp: it rebuilds the model matrix
//! from identity, uploads one MVP uniform, and draws. Nothing mutates
//! between frames.
//!
//! [`frame`]: ScenePipeline::frame

use thiserror::Error;

use crate::render::capture::CaptureBuffer;
use crate::render::glsl;
use crate::render::mesh::GpuMesh;
use crate::render::shader::{build_program, ShaderError};
use crate::render::texture::{placeholder_texture, upload_rgba};
use crate::scene::SceneConfig;
use crate::transform::{Animation, TransformPipeline};

/// Placeholder color shown until the real texture arrives (mid gray).
const PLACEHOLDER_RGBA: [u8; 4] = [128, 128, 128, 255];

/// Errors from pipeline assembly or texture replacement.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Shader compilation or linking failed.
    #[error(transparent)]
    Shader(#[from] ShaderError),
    /// A GL object could not be created or updated.
    #[error("gl error: {0}")]
    Gl(String),
    /// A texture operation was requested on a scene without a texture.
    #[error("scene '{0}' has no texture")]
    NoTexture(String),
}

/// GPU state for one scene, captured once at setup and read-only during
/// rendering.
pub struct ScenePipeline {
    name: String,
    program: glow::Program,
    mvp_location: Option<glow::UniformLocation>,
    mesh: GpuMesh,
    texture: Option<glow::Texture>,
    capture: Option<CaptureBuffer>,
    transforms: TransformPipeline,
    animation: Animation,
    clear_color: [f32; 4],
}

impl ScenePipeline {
    /// Builds the GPU state for `config`.
    ///
    /// Selects shader sources by shading mode (the capture variant swaps
    /// in the capture vertex stage and registers its varyings before
    /// linking), compiles and links the program, uploads the mesh,
    /// creates the placeholder texture for textured scenes, and sets the
    /// frame-constant GL state (depth test, clear depth, texture unit 0).
    ///
    /// # Errors
    ///
    /// Propagates shader and GL object failures; anything built before
    /// the failure is released.
    #[allow(unsafe_code)]
    pub fn build(gl: &glow::Context, config: &SceneConfig) -> Result<Self, PipelineError> {
        use glow::HasContext;

        let (vertex_src, fragment_src, varyings): (&str, &str, &[&str]) = if config.capture {
            (
                glsl::CAPTURE_VERTEX_SHADER,
                glsl::FLAT_FRAGMENT_SHADER,
                glsl::CAPTURE_VARYINGS,
            )
        } else if config.needs_texture() {
            (
                glsl::TEXTURED_VERTEX_SHADER,
                glsl::TEXTURED_FRAGMENT_SHADER,
                &[],
            )
        } else {
            (glsl::FLAT_VERTEX_SHADER, glsl::FLAT_FRAGMENT_SHADER, &[])
        };

        let program = build_program(gl, vertex_src, fragment_src, varyings)?;

        // SAFETY: glow exposes raw GL entry points as unsafe; program is
        // the valid handle linked above.
        let release_program = |gl: &glow::Context| unsafe { gl.delete_program(program) };

        let mesh = match GpuMesh::upload(gl, program, &config.geometry) {
            Ok(mesh) => mesh,
            Err(err) => {
                release_program(gl);
                return Err(PipelineError::Gl(err));
            }
        };

        let texture = if config.needs_texture() {
            match placeholder_texture(gl, PLACEHOLDER_RGBA) {
                Ok(texture) => Some(texture),
                Err(err) => {
                    mesh.destroy(gl);
                    release_program(gl);
                    return Err(PipelineError::Gl(err));
                }
            }
        } else {
            None
        };

        let capture = if config.capture {
            match CaptureBuffer::new(gl, config.geometry.vertex_count(), glsl::CAPTURE_COMPONENTS)
            {
                Ok(buffer) => Some(buffer),
                Err(err) => {
                    if let Some(texture) = texture {
                        // SAFETY: texture is the valid handle created above.
                        unsafe { gl.delete_texture(texture) };
                    }
                    mesh.destroy(gl);
                    release_program(gl);
                    return Err(PipelineError::Gl(err));
                }
            }
        } else {
            None
        };

        // SAFETY: frame-constant state setup on a live context; the
        // sampler uniform binds texture unit 0 once, matching
        // active_texture below.
        let mvp_location = unsafe {
            gl.use_program(Some(program));
            if let Some(sampler) = gl.get_uniform_location(program, "u_sampler") {
                gl.uniform_1_i32(Some(&sampler), 0);
            }
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LEQUAL);
            gl.clear_depth_f32(1.0);
            gl.active_texture(glow::TEXTURE0);
            gl.get_uniform_location(program, "u_mvp")
        };

        Ok(Self {
            name: config.name.clone(),
            program,
            mvp_location,
            mesh,
            texture,
            capture,
            transforms: TransformPipeline::new(&config.camera, &config.projection),
            animation: config.animation.clone(),
            clear_color: config.clear_color,
        })
    }

    /// Renders one frame for the host timestamp (milliseconds).
    ///
    /// Clears, rebuilds the model matrix from identity at `t`, uploads
    /// the composed MVP, and draws the indexed mesh. Deterministic: the
    /// same timestamp always produces the same frame.
    #[allow(unsafe_code)]
    pub fn frame(&self, gl: &glow::Context, timestamp_ms: f64) {
        use glow::HasContext;

        let t = (timestamp_ms / 1000.0) as f32;
        let mvp = self.transforms.mvp(self.animation.model_matrix(t));

        // SAFETY: all handles were created in build() and the MVP slice
        // is exactly 16 floats.
        unsafe {
            let [r, g, b, a] = self.clear_color;
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.use_program(Some(self.program));
            gl.uniform_matrix_4_f32_slice(
                self.mvp_location.as_ref(),
                false,
                &mvp.to_cols_array(),
            );
            if let Some(texture) = self.texture {
                gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            }
        }

        self.mesh.draw(gl);

        // SAFETY: flush on a live context.
        unsafe { gl.flush() };
    }

    /// Runs a transform-feedback capture pass for the given timestamp.
    ///
    /// Records the capture varyings for every vertex into the capture
    /// buffer with rasterization discarded. Returns without drawing if
    /// this scene was not built with capture enabled.
    #[allow(unsafe_code)]
    pub fn capture_pass(&self, gl: &glow::Context, timestamp_ms: f64) {
        use glow::HasContext;

        let Some(capture) = &self.capture else {
            return;
        };

        let t = (timestamp_ms / 1000.0) as f32;
        let mvp = self.transforms.mvp(self.animation.model_matrix(t));

        // SAFETY: see frame().
        unsafe {
            gl.use_program(Some(self.program));
            gl.uniform_matrix_4_f32_slice(
                self.mvp_location.as_ref(),
                false,
                &mvp.to_cols_array(),
            );
        }

        capture.begin(gl);
        self.mesh.draw_vertices_as_points(gl);
        capture.end(gl);
    }

    /// Replaces the placeholder texture with a full RGBA image.
    ///
    /// # Errors
    ///
    /// `PipelineError::NoTexture` if the scene is not textured, or
    /// `PipelineError::Gl` if the pixel buffer does not match the
    /// declared dimensions.
    pub fn set_texture_rgba(
        &self,
        gl: &glow::Context,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<(), PipelineError> {
        let texture = self
            .texture
            .ok_or_else(|| PipelineError::NoTexture(self.name.clone()))?;
        upload_rgba(gl, texture, width, height, pixels).map_err(PipelineError::Gl)
    }

    /// The capture buffer, if this scene records transform feedback.
    pub fn capture_buffer(&self) -> Option<&CaptureBuffer> {
        self.capture.as_ref()
    }

    /// Scene name this pipeline was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Releases the program, mesh, texture, and capture buffer.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        if let Some(capture) = &self.capture {
            capture.destroy(gl);
        }
        if let Some(texture) = self.texture {
            // SAFETY: texture is a valid handle from build().
            unsafe { gl.delete_texture(texture) };
        }
        self.mesh.destroy(gl);
        // SAFETY: program is a valid handle from build().
        unsafe { gl.delete_program(self.program) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_texture_error_names_the_scene() {
        let err = PipelineError::NoTexture("triangle".into());
        assert!(format!("{err}").contains("triangle"));
    }

    #[test]
    fn shader_error_passes_through_transparently() {
        let err = PipelineError::from(ShaderError::Link("bad varying".into()));
        assert!(format!("{err}").contains("bad varying"));
    }

    #[test]
    #[ignore = "requires GL context"]
    fn build_then_frame_draws_without_error() {
        // Would test: ScenePipeline::build(gl, &cube_config) then frame(gl, 16.0)
        // leaves glGetError() clean.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn capture_pass_fills_the_capture_buffer() {
        // Would test: capture_pass followed by CaptureBuffer::read returns
        // 24 * 4 floats matching the CPU-side MVP transform.
    }
}
