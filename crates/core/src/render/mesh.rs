//! GPU mesh upload: one VAO binding per-attribute VBOs and a u16 index
//! buffer, drawn as an indexed triangle list.
//!
//! Buffers are uploaded once with `STATIC_DRAW` and never mutated
//! afterward; the VAO records the attribute size/type/stride bindings so
//! a draw call is bind-and-go.

use crate::geometry::{Geometry, COLOR_SIZE, TEXCOORD_SIZE};

/// Reinterprets a float slice as bytes for buffer upload.
#[allow(unsafe_code)]
pub(crate) fn f32_bytes(data: &[f32]) -> &[u8] {
    // SAFETY: f32 has no padding and every bit pattern is a valid byte;
    // the slice spans exactly size_of_val(data) initialized bytes.
    unsafe { std::slice::from_raw_parts(data.as_ptr().cast::<u8>(), std::mem::size_of_val(data)) }
}

/// Reinterprets a u16 slice as bytes for index buffer upload.
#[allow(unsafe_code)]
fn u16_bytes(data: &[u16]) -> &[u8] {
    // SAFETY: u16 has no padding; see f32_bytes.
    unsafe { std::slice::from_raw_parts(data.as_ptr().cast::<u8>(), std::mem::size_of_val(data)) }
}

/// A geometry uploaded to the GPU: VAO, per-attribute VBOs, and the IBO.
pub struct GpuMesh {
    vao: glow::VertexArray,
    vertex_buffers: Vec<glow::Buffer>,
    index_buffer: glow::Buffer,
    index_count: i32,
    vertex_count: i32,
}

impl GpuMesh {
    /// Uploads `geometry` against `program`'s attribute locations.
    ///
    /// Creates the VAO, then for each attribute present in the geometry
    /// (position, color, texcoord) creates a VBO, uploads the float
    /// data, and records the pointer binding. Attributes the linker
    /// optimized away are skipped. Finishes with the u16 index upload.
    ///
    /// # Errors
    ///
    /// Returns the GL error string if an object cannot be created.
    /// Already-created objects are deleted before returning.
    #[allow(unsafe_code)]
    pub fn upload(
        gl: &glow::Context,
        program: glow::Program,
        geometry: &Geometry,
    ) -> Result<Self, String> {
        use glow::HasContext;

        struct Attribute<'a> {
            name: &'static str,
            size: i32,
            data: &'a [f32],
        }

        let mut attributes = vec![
            Attribute {
                name: "position",
                size: geometry.position_size() as i32,
                data: geometry.positions(),
            },
            Attribute {
                name: "color",
                size: COLOR_SIZE as i32,
                data: geometry.colors(),
            },
        ];
        if let Some(uv) = geometry.texcoords() {
            attributes.push(Attribute {
                name: "texcoord",
                size: TEXCOORD_SIZE as i32,
                data: uv,
            });
        }

        // SAFETY: glow exposes raw GL entry points as unsafe. All handles
        // used below are created here or passed in valid; partially
        // created objects are released on the failure path.
        let vao = unsafe { gl.create_vertex_array()? };
        let mut vertex_buffers = Vec::with_capacity(attributes.len());

        let cleanup = |gl: &glow::Context, buffers: &[glow::Buffer]| unsafe {
            gl.bind_vertex_array(None);
            for &buffer in buffers {
                gl.delete_buffer(buffer);
            }
            gl.delete_vertex_array(vao);
        };

        unsafe {
            gl.bind_vertex_array(Some(vao));

            for attribute in &attributes {
                let Some(location) = gl.get_attrib_location(program, attribute.name) else {
                    // Linker stripped an unused attribute; nothing to bind.
                    continue;
                };
                let buffer = match gl.create_buffer() {
                    Ok(buffer) => buffer,
                    Err(err) => {
                        cleanup(gl, &vertex_buffers);
                        return Err(err);
                    }
                };
                vertex_buffers.push(buffer);
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    f32_bytes(attribute.data),
                    glow::STATIC_DRAW,
                );
                gl.vertex_attrib_pointer_f32(location, attribute.size, glow::FLOAT, false, 0, 0);
                gl.enable_vertex_attrib_array(location);
            }

            let index_buffer = match gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(err) => {
                    cleanup(gl, &vertex_buffers);
                    return Err(err);
                }
            };
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                u16_bytes(geometry.indices()),
                glow::STATIC_DRAW,
            );

            gl.bind_vertex_array(None);

            Ok(Self {
                vao,
                vertex_buffers,
                index_buffer,
                index_count: geometry.indices().len() as i32,
                vertex_count: geometry.vertex_count() as i32,
            })
        }
    }

    /// Draws the full index list as triangles.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.vao records valid buffer bindings from upload().
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_elements(glow::TRIANGLES, self.index_count, glow::UNSIGNED_SHORT, 0);
            gl.bind_vertex_array(None);
        }
    }

    /// Draws every vertex once as points, without indices. Used by the
    /// transform-feedback capture pass, which WebGL2 restricts to
    /// non-indexed draws.
    #[allow(unsafe_code)]
    pub fn draw_vertices_as_points(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: see draw().
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::POINTS, 0, self.vertex_count);
            gl.bind_vertex_array(None);
        }
    }

    /// Number of indices drawn per frame.
    pub fn index_count(&self) -> i32 {
        self.index_count
    }

    /// Number of uploaded vertices.
    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    /// Deletes the VAO and all buffers. The GL context has no destructor,
    /// so cleanup is explicit.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: all handles were created in upload() and are deleted once.
        unsafe {
            for &buffer in &self.vertex_buffers {
                gl.delete_buffer(buffer);
            }
            gl.delete_buffer(self.index_buffer);
            gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_bytes_length_is_four_per_float() {
        let data = [1.0f32, 2.0, 3.0];
        assert_eq!(f32_bytes(&data).len(), 12);
    }

    #[test]
    fn f32_bytes_roundtrips_bit_patterns() {
        let data = [1.5f32, -0.25];
        let bytes = f32_bytes(&data);
        assert_eq!(&bytes[..4], &1.5f32.to_ne_bytes());
        assert_eq!(&bytes[4..], &(-0.25f32).to_ne_bytes());
    }

    #[test]
    fn u16_bytes_length_is_two_per_index() {
        let data = [0u16, 1, 2, 3];
        assert_eq!(u16_bytes(&data).len(), 8);
    }

    #[test]
    fn u16_bytes_roundtrips_bit_patterns() {
        let data = [0x0102u16, 0xFFEE];
        let bytes = u16_bytes(&data);
        assert_eq!(&bytes[..2], &0x0102u16.to_ne_bytes());
        assert_eq!(&bytes[2..], &0xFFEEu16.to_ne_bytes());
    }

    #[test]
    #[ignore = "requires GL context"]
    fn upload_creates_vao_with_expected_counts() {
        // Would test: GpuMesh::upload(gl, program, &Geometry::cube()) has
        // index_count 36 and vertex_count 24.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn destroy_releases_all_buffers() {
        // Would test: after destroy(), every buffer and the VAO are deleted.
    }
}
