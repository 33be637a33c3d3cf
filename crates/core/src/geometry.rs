//! Validated CPU-side geometry: interleavable attribute arrays plus a
//! u16 triangle-list index buffer.
//!
//! A `Geometry` is immutable once constructed. Validation happens in
//! [`Geometry::new`]; the built-in shapes (`triangle`, `cube`,
//! `textured_cube`) carry the vertex data shared by every demo scene.

use crate::error::DemoError;

/// Number of color components per vertex (RGBA).
pub const COLOR_SIZE: usize = 4;

/// Number of texture-coordinate components per vertex (UV).
pub const TEXCOORD_SIZE: usize = 2;

/// An immutable vertex/index data set for one draw call.
///
/// Positions may be 2- or 3-component; colors are always RGBA; texture
/// coordinates are optional UV pairs. Indices describe a triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Vec<f32>,
    position_size: usize,
    colors: Vec<f32>,
    texcoords: Option<Vec<f32>>,
    indices: Vec<u16>,
}

impl Geometry {
    /// Constructs a geometry after validating attribute/index consistency.
    ///
    /// # Errors
    ///
    /// - `EmptyGeometry` if there are no positions or no indices.
    /// - `ComponentMismatch` if an attribute array's length is not
    ///   divisible by its component size.
    /// - `VertexCountMismatch` if colors or texcoords describe a
    ///   different number of vertices than the positions.
    /// - `IndexCountNotTriangles` if the index count is not a multiple of 3.
    /// - `IndexOutOfBounds` if any index references a missing vertex.
    pub fn new(
        positions: Vec<f32>,
        position_size: usize,
        colors: Vec<f32>,
        texcoords: Option<Vec<f32>>,
        indices: Vec<u16>,
    ) -> Result<Self, DemoError> {
        if positions.is_empty() || indices.is_empty() {
            return Err(DemoError::EmptyGeometry);
        }
        if position_size == 0 || positions.len() % position_size != 0 {
            return Err(DemoError::ComponentMismatch {
                attribute: "position",
                len: positions.len(),
                size: position_size,
            });
        }
        let vertex_count = positions.len() / position_size;

        if colors.len() % COLOR_SIZE != 0 {
            return Err(DemoError::ComponentMismatch {
                attribute: "color",
                len: colors.len(),
                size: COLOR_SIZE,
            });
        }
        if colors.len() / COLOR_SIZE != vertex_count {
            return Err(DemoError::VertexCountMismatch {
                attribute: "color",
                expected: vertex_count,
                got: colors.len() / COLOR_SIZE,
            });
        }

        if let Some(uv) = &texcoords {
            if uv.len() % TEXCOORD_SIZE != 0 {
                return Err(DemoError::ComponentMismatch {
                    attribute: "texcoord",
                    len: uv.len(),
                    size: TEXCOORD_SIZE,
                });
            }
            if uv.len() / TEXCOORD_SIZE != vertex_count {
                return Err(DemoError::VertexCountMismatch {
                    attribute: "texcoord",
                    expected: vertex_count,
                    got: uv.len() / TEXCOORD_SIZE,
                });
            }
        }

        if indices.len() % 3 != 0 {
            return Err(DemoError::IndexCountNotTriangles(indices.len()));
        }
        for &index in &indices {
            if usize::from(index) >= vertex_count {
                return Err(DemoError::IndexOutOfBounds {
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self {
            positions,
            position_size,
            colors,
            texcoords,
            indices,
        })
    }

    /// A single 2D triangle with red, green, and blue corners.
    pub fn triangle() -> Self {
        let positions = vec![0.0, 1.0, 1.0, 0.0, -1.0, 0.0];
        let colors = vec![
            1.0, 0.0, 0.0, 1.0, //
            0.0, 1.0, 0.0, 1.0, //
            0.0, 0.0, 1.0, 1.0,
        ];
        Self::new(positions, 2, colors, None, vec![0, 1, 2])
            .expect("triangle data is statically valid")
    }

    /// A unit cube with 24 vertices (4 per face) and one solid color per
    /// face: white front, red back, green top, blue bottom, yellow right,
    /// magenta left.
    pub fn cube() -> Self {
        Self::new(
            cube_positions(),
            3,
            cube_colors(),
            None,
            cube_indices(),
        )
        .expect("cube data is statically valid")
    }

    /// The cube with per-face UV coordinates for texture sampling.
    pub fn textured_cube() -> Self {
        let uv_per_face = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let texcoords: Vec<f32> = std::iter::repeat(uv_per_face)
            .take(6)
            .flatten()
            .collect();
        Self::new(
            cube_positions(),
            3,
            cube_colors(),
            Some(texcoords),
            cube_indices(),
        )
        .expect("textured cube data is statically valid")
    }

    /// Position components, `vertex_count() * position_size()` long.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Components per position (2 or 3).
    pub fn position_size(&self) -> usize {
        self.position_size
    }

    /// RGBA color components.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// UV components, if this geometry is textured.
    pub fn texcoords(&self) -> Option<&[f32]> {
        self.texcoords.as_deref()
    }

    /// Triangle-list indices.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Number of vertices described by the attribute arrays.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / self.position_size
    }

    /// Number of triangles in the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn cube_positions() -> Vec<f32> {
    vec![
        // front
        -1.0, -1.0, 1.0, //
        1.0, -1.0, 1.0, //
        1.0, 1.0, 1.0, //
        -1.0, 1.0, 1.0, //
        // back
        -1.0, -1.0, -1.0, //
        -1.0, 1.0, -1.0, //
        1.0, 1.0, -1.0, //
        1.0, -1.0, -1.0, //
        // top
        -1.0, 1.0, -1.0, //
        -1.0, 1.0, 1.0, //
        1.0, 1.0, 1.0, //
        1.0, 1.0, -1.0, //
        // bottom
        -1.0, -1.0, -1.0, //
        1.0, -1.0, -1.0, //
        1.0, -1.0, 1.0, //
        -1.0, -1.0, 1.0, //
        // right
        1.0, -1.0, -1.0, //
        1.0, 1.0, -1.0, //
        1.0, 1.0, 1.0, //
        1.0, -1.0, 1.0, //
        // left
        -1.0, -1.0, -1.0, //
        -1.0, -1.0, 1.0, //
        -1.0, 1.0, 1.0, //
        -1.0, 1.0, -1.0,
    ]
}

fn cube_colors() -> Vec<f32> {
    let face_colors: [[f32; 4]; 6] = [
        [1.0, 1.0, 1.0, 1.0], // front: white
        [1.0, 0.0, 0.0, 1.0], // back: red
        [0.0, 1.0, 0.0, 1.0], // top: green
        [0.0, 0.0, 1.0, 1.0], // bottom: blue
        [1.0, 1.0, 0.0, 1.0], // right: yellow
        [1.0, 0.0, 1.0, 1.0], // left: magenta
    ];
    face_colors
        .iter()
        .flat_map(|rgba| std::iter::repeat(*rgba).take(4).flatten())
        .collect()
}

fn cube_indices() -> Vec<u16> {
    (0..6u16)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_three_vertices_and_one_triangle() {
        let tri = Geometry::triangle();
        assert_eq!(tri.vertex_count(), 3);
        assert_eq!(tri.triangle_count(), 1);
        assert_eq!(tri.position_size(), 2);
        assert!(tri.texcoords().is_none());
    }

    #[test]
    fn cube_has_24_vertices_and_12_triangles() {
        let cube = Geometry::cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.position_size(), 3);
    }

    #[test]
    fn cube_indices_cover_every_face_quad() {
        let cube = Geometry::cube();
        assert_eq!(cube.indices().len(), 36);
        // Each face contributes the quad split 0-1-2 / 0-2-3.
        assert_eq!(&cube.indices()[..6], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(&cube.indices()[30..], &[20, 21, 22, 20, 22, 23]);
    }

    #[test]
    fn cube_positions_stay_on_unit_extent() {
        let cube = Geometry::cube();
        assert!(cube.positions().iter().all(|&c| c == 1.0 || c == -1.0));
    }

    #[test]
    fn cube_faces_are_solid_colored() {
        let cube = Geometry::cube();
        for face in 0..6 {
            let face_colors = &cube.colors()[face * 16..(face + 1) * 16];
            let first = &face_colors[..4];
            for vertex in 1..4 {
                assert_eq!(
                    &face_colors[vertex * 4..vertex * 4 + 4],
                    first,
                    "face {face} vertex {vertex} color differs"
                );
            }
        }
    }

    #[test]
    fn textured_cube_has_uv_per_vertex() {
        let cube = Geometry::textured_cube();
        let uv = cube.texcoords().expect("textured cube must carry UVs");
        assert_eq!(uv.len(), cube.vertex_count() * TEXCOORD_SIZE);
        assert!(uv.iter().all(|&c| (0.0..=1.0).contains(&c)));
    }

    #[test]
    fn empty_positions_are_rejected() {
        let result = Geometry::new(vec![], 3, vec![], None, vec![0, 1, 2]);
        assert!(matches!(result, Err(DemoError::EmptyGeometry)));
    }

    #[test]
    fn empty_indices_are_rejected() {
        let result = Geometry::new(vec![0.0; 9], 3, vec![0.0; 12], None, vec![]);
        assert!(matches!(result, Err(DemoError::EmptyGeometry)));
    }

    #[test]
    fn indivisible_position_length_is_rejected() {
        let result = Geometry::new(vec![0.0; 7], 3, vec![0.0; 8], None, vec![0, 1, 2]);
        assert!(matches!(
            result,
            Err(DemoError::ComponentMismatch {
                attribute: "position",
                ..
            })
        ));
    }

    #[test]
    fn color_vertex_count_mismatch_is_rejected() {
        // 3 position vertices but only 2 color vertices.
        let result = Geometry::new(vec![0.0; 9], 3, vec![0.0; 8], None, vec![0, 1, 2]);
        assert!(matches!(
            result,
            Err(DemoError::VertexCountMismatch {
                attribute: "color",
                expected: 3,
                got: 2,
            })
        ));
    }

    #[test]
    fn texcoord_vertex_count_mismatch_is_rejected() {
        let result = Geometry::new(
            vec![0.0; 9],
            3,
            vec![0.0; 12],
            Some(vec![0.0; 4]),
            vec![0, 1, 2],
        );
        assert!(matches!(
            result,
            Err(DemoError::VertexCountMismatch {
                attribute: "texcoord",
                ..
            })
        ));
    }

    #[test]
    fn non_triangle_index_count_is_rejected() {
        let result = Geometry::new(vec![0.0; 9], 3, vec![0.0; 12], None, vec![0, 1]);
        assert!(matches!(result, Err(DemoError::IndexCountNotTriangles(2))));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let result = Geometry::new(vec![0.0; 9], 3, vec![0.0; 12], None, vec![0, 1, 3]);
        assert!(matches!(
            result,
            Err(DemoError::IndexOutOfBounds {
                index: 3,
                vertex_count: 3,
            })
        ));
    }

    #[test]
    fn zero_position_size_is_rejected() {
        let result = Geometry::new(vec![0.0; 9], 0, vec![0.0; 12], None, vec![0, 1, 2]);
        assert!(matches!(
            result,
            Err(DemoError::ComponentMismatch {
                attribute: "position",
                ..
            })
        ));
    }
}
