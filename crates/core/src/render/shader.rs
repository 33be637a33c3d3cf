//! Shader stage compilation and program linking.
//!
//! The builder contract: compile each stage independently, reporting the
//! stage and the driver's diagnostic on failure; link the two stages,
//! reporting the linker diagnostic on failure; release partially-built
//! shader objects on every failure path so nothing leaks. Diagnostic
//! formatting is pure string processing and runs without a GPU.

use std::fmt;

use thiserror::Error;

/// A compilable shader stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    /// The matching GL shader type constant.
    pub fn gl_type(self) -> u32 {
        match self {
            Stage::Vertex => glow::VERTEX_SHADER,
            Stage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        })
    }
}

/// Errors from shader compilation or program linking.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A stage failed to compile.
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile {
        /// Which stage failed.
        stage: Stage,
        /// Numbered source plus the driver's info log.
        log: String,
    },
    /// The program failed to link.
    #[error("program failed to link:\n{0}")]
    Link(String),
}

/// Interleaves line numbers into `source` and appends the driver `log`,
/// so diagnostics that reference line numbers can be read against the
/// GLSL that produced them.
pub fn format_shader_log(source: &str, log: &str) -> String {
    let width = source.lines().count().to_string().len().max(1);
    let numbered: Vec<String> = source
        .lines()
        .enumerate()
        .map(|(i, line)| format!("{:>width$} | {line}", i + 1, width = width))
        .collect();

    match (numbered.is_empty(), log.trim().is_empty()) {
        (true, _) => log.to_string(),
        (false, true) => numbered.join("\n"),
        (false, false) => format!("{}\n\n{log}", numbered.join("\n")),
    }
}

/// Compiles one shader stage.
///
/// # Errors
///
/// Returns `ShaderError::Compile` with the stage and formatted log if the
/// source does not compile. The failed shader object is deleted before
/// returning.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    stage: Stage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    // SAFETY: glow exposes raw GL entry points as unsafe. The stage
    // constant and source string are valid, and the shader object is
    // deleted on the failure path.
    let shader = unsafe {
        gl.create_shader(stage.gl_type())
            .map_err(|log| ShaderError::Compile { stage, log })?
    };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    if unsafe { gl.get_shader_compile_status(shader) } {
        Ok(shader)
    } else {
        let log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        Err(ShaderError::Compile {
            stage,
            log: format_shader_log(source, &log),
        })
    }
}

/// Links compiled vertex and fragment stages into a program.
///
/// If `capture_varyings` is non-empty, the named vertex outputs are
/// registered for transform-feedback capture (interleaved) before the
/// link. Both stages are detached after linking; the program keeps its
/// own copies.
///
/// # Errors
///
/// Returns `ShaderError::Link` with the linker diagnostic. The failed
/// program object is deleted before returning.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
    capture_varyings: &[&str],
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    // SAFETY: shader handles come from successful compile_shader calls;
    // the program object is deleted on the failure path.
    let program = unsafe { gl.create_program().map_err(ShaderError::Link)? };

    unsafe {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        if !capture_varyings.is_empty() {
            gl.transform_feedback_varyings(program, capture_varyings, glow::INTERLEAVED_ATTRIBS);
        }
        gl.link_program(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
    }

    if unsafe { gl.get_program_link_status(program) } {
        Ok(program)
    } else {
        let log = unsafe { gl.get_program_info_log(program) };
        unsafe { gl.delete_program(program) };
        Err(ShaderError::Link(log))
    }
}

/// Compiles both stages and links them, cleaning up the stage objects on
/// every path.
///
/// # Errors
///
/// Returns the first `ShaderError::Compile`, or `ShaderError::Link` if
/// both stages compiled but linking failed.
#[allow(unsafe_code)]
pub fn build_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
    capture_varyings: &[&str],
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    let vertex = compile_shader(gl, Stage::Vertex, vertex_src)?;
    let fragment = match compile_shader(gl, Stage::Fragment, fragment_src) {
        Ok(shader) => shader,
        Err(err) => {
            // SAFETY: vertex is a valid handle from the compile above.
            unsafe { gl.delete_shader(vertex) };
            return Err(err);
        }
    };

    let result = link_program(gl, vertex, fragment, capture_varyings);

    // SAFETY: the program holds its own copies of both stages, so the
    // stage objects can be deleted whether linking succeeded or not.
    unsafe {
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);
    }

    result
}
