//! GLSL ES 3.0 sources for the flat, textured, and capture pipelines.
//!
//! Attribute names (`position`, `color`, `texcoord`) are looked up by
//! [`super::mesh::GpuMesh::upload`]; the uniform names (`u_mvp`,
//! `u_sampler`) are cached by the pipeline at build time.

/// Vertex stage for flat shading: transforms by the MVP uniform and
/// passes the vertex color through.
pub const FLAT_VERTEX_SHADER: &str = r#"#version 300 es
in vec3 position;
in vec4 color;

uniform mat4 u_mvp;

out vec4 v_color;

void main() {
    v_color = color;
    gl_Position = u_mvp * vec4(position, 1.0);
}
"#;

/// Fragment stage for flat shading: interpolated vertex color only.
pub const FLAT_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec4 v_color;

out vec4 out_color;

void main() {
    out_color = v_color;
}
"#;

/// Vertex stage for textured shading: also forwards UV coordinates.
pub const TEXTURED_VERTEX_SHADER: &str = r#"#version 300 es
in vec3 position;
in vec4 color;
in vec2 texcoord;

uniform mat4 u_mvp;

out vec4 v_color;
out vec2 v_uv;

void main() {
    v_color = color;
    v_uv = texcoord;
    gl_Position = u_mvp * vec4(position, 1.0);
}
"#;

/// Fragment stage for textured shading: sampled texel modulated by the
/// vertex color.
pub const TEXTURED_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec4 v_color;
in vec2 v_uv;

uniform sampler2D u_sampler;

out vec4 out_color;

void main() {
    out_color = texture(u_sampler, v_uv) * v_color;
}
"#;

/// Vertex stage for the capture pipeline: writes the clip-space position
/// to a varying so transform feedback can record it.
pub const CAPTURE_VERTEX_SHADER: &str = r#"#version 300 es
in vec3 position;
in vec4 color;

uniform mat4 u_mvp;

out vec4 v_captured;
out vec4 v_color;

void main() {
    v_color = color;
    v_captured = u_mvp * vec4(position, 1.0);
    gl_Position = v_captured;
}
"#;

/// Vertex outputs recorded by the capture pipeline, in buffer order.
pub const CAPTURE_VARYINGS: &[&str] = &["v_captured"];

/// Floats written per vertex by the capture pipeline (one vec4).
pub const CAPTURE_COMPONENTS: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SOURCES: &[&str] = &[
        FLAT_VERTEX_SHADER,
        FLAT_FRAGMENT_SHADER,
        TEXTURED_VERTEX_SHADER,
        TEXTURED_FRAGMENT_SHADER,
        CAPTURE_VERTEX_SHADER,
    ];

    #[test]
    fn every_source_declares_glsl_es_300() {
        for source in ALL_SOURCES {
            assert!(
                source.starts_with("#version 300 es"),
                "missing version directive in:\n{source}"
            );
        }
    }

    #[test]
    fn every_source_has_a_main_function() {
        for source in ALL_SOURCES {
            assert!(source.contains("void main()"), "missing main in:\n{source}");
        }
    }

    #[test]
    fn vertex_stages_consume_the_mvp_uniform() {
        for source in [
            FLAT_VERTEX_SHADER,
            TEXTURED_VERTEX_SHADER,
            CAPTURE_VERTEX_SHADER,
        ] {
            assert!(
                source.contains("uniform mat4 u_mvp"),
                "missing u_mvp in:\n{source}"
            );
            assert!(source.contains("gl_Position"), "missing gl_Position");
        }
    }

    #[test]
    fn textured_stages_wire_uv_through_to_sampler() {
        assert!(TEXTURED_VERTEX_SHADER.contains("in vec2 texcoord"));
        assert!(TEXTURED_VERTEX_SHADER.contains("out vec2 v_uv"));
        assert!(TEXTURED_FRAGMENT_SHADER.contains("uniform sampler2D u_sampler"));
        assert!(TEXTURED_FRAGMENT_SHADER.contains("texture(u_sampler, v_uv)"));
    }

    #[test]
    fn capture_varyings_exist_in_the_capture_vertex_stage() {
        for varying in CAPTURE_VARYINGS {
            assert!(
                CAPTURE_VERTEX_SHADER.contains(varying),
                "varying {varying} not declared in capture stage"
            );
        }
    }

    #[test]
    fn fragment_stages_declare_float_precision() {
        for source in [FLAT_FRAGMENT_SHADER, TEXTURED_FRAGMENT_SHADER] {
            assert!(
                source.contains("precision highp float"),
                "missing precision qualifier in:\n{source}"
            );
        }
    }
}
