//! WebGL2 rendering infrastructure.
//!
//! Only available with the `render` feature. Everything here takes a
//! `glow::Context` supplied by the host (browser canvas or native GL);
//! the context is treated as an opaque capability provider and is never
//! created in this crate.
//!
//! # Module overview
//!
//! - [`shader`] -- Stage compilation, program linking, diagnostic formatting.
//! - [`glsl`] -- GLSL ES 3.0 sources for the flat/textured/capture pipelines.
//! - [`mesh`] -- VAO + vertex/index buffer upload and indexed drawing.
//! - [`texture`] -- Placeholder texture and RGBA image replacement.
//! - [`capture`] -- Transform-feedback capture buffer skeleton.
//! - [`pipeline`] -- Scene pipeline assembly and the per-frame draw.

pub mod capture;
pub mod glsl;
pub mod mesh;
pub mod pipeline;
pub mod shader;
pub mod texture;

pub use capture::CaptureBuffer;
pub use mesh::GpuMesh;
pub use pipeline::{PipelineError, ScenePipeline};
pub use shader::{build_program, compile_shader, format_shader_log, link_program, ShaderError, Stage};
pub use texture::{placeholder_texture, upload_rgba};
