//! Error types for the tricube core.

use thiserror::Error;

/// Errors produced by geometry validation and scene resolution.
#[derive(Debug, Error)]
pub enum DemoError {
    /// An attribute array's length was not divisible by its component size.
    #[error("attribute '{attribute}' has {len} components, not divisible by size {size}")]
    ComponentMismatch {
        attribute: &'static str,
        len: usize,
        size: usize,
    },

    /// An attribute described a different number of vertices than the positions.
    #[error("attribute '{attribute}' describes {got} vertices, expected {expected}")]
    VertexCountMismatch {
        attribute: &'static str,
        expected: usize,
        got: usize,
    },

    /// The index list length was not a multiple of three (triangle-list topology).
    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    /// An index referenced a vertex past the end of the attribute arrays.
    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u16, vertex_count: usize },

    /// A geometry had no vertices or no indices.
    #[error("geometry must have at least one vertex and one index")]
    EmptyGeometry,

    /// A requested scene name was not found in the registry.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// A scene parameter existed but could not be interpreted.
    #[error("invalid parameter '{name}': {detail}")]
    InvalidParam { name: String, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_mismatch_includes_attribute_and_counts() {
        let err = DemoError::ComponentMismatch {
            attribute: "position",
            len: 7,
            size: 3,
        };
        let msg = format!("{err}");
        assert!(msg.contains("position"), "missing attribute in: {msg}");
        assert!(msg.contains('7'), "missing length in: {msg}");
        assert!(msg.contains('3'), "missing size in: {msg}");
    }

    #[test]
    fn vertex_count_mismatch_includes_both_counts() {
        let err = DemoError::VertexCountMismatch {
            attribute: "color",
            expected: 24,
            got: 20,
        };
        let msg = format!("{err}");
        assert!(msg.contains("color"), "missing attribute in: {msg}");
        assert!(msg.contains("24"), "missing expected count in: {msg}");
        assert!(msg.contains("20"), "missing got count in: {msg}");
    }

    #[test]
    fn index_out_of_bounds_includes_index_and_vertex_count() {
        let err = DemoError::IndexOutOfBounds {
            index: 36,
            vertex_count: 24,
        };
        let msg = format!("{err}");
        assert!(msg.contains("36"), "missing index in: {msg}");
        assert!(msg.contains("24"), "missing vertex count in: {msg}");
    }

    #[test]
    fn unknown_scene_includes_name() {
        let err = DemoError::UnknownScene("teapot".into());
        let msg = format!("{err}");
        assert!(msg.contains("teapot"), "missing scene name in: {msg}");
    }

    #[test]
    fn invalid_param_includes_name_and_detail() {
        let err = DemoError::InvalidParam {
            name: "clear_color".into(),
            detail: "expected 4 components".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("clear_color"), "missing name in: {msg}");
        assert!(msg.contains("4 components"), "missing detail in: {msg}");
    }

    #[test]
    fn demo_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DemoError>();
    }

    #[test]
    fn demo_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<DemoError>();
    }
}
