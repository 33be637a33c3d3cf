//! Transform-feedback capture skeleton.
//!
//! A `CaptureBuffer` receives vertex-stage outputs during a capture
//! pass instead of (or in addition to) rasterization. WebGL2 only
//! permits non-indexed draws while transform feedback is active, so the
//! capture pass runs [`super::mesh::GpuMesh::draw_vertices_as_points`]
//! with rasterization discarded. No scene consumes the captured data;
//! this exists so the capture variant exercises the full setup path.

/// A GPU buffer sized to receive transform-feedback output.
pub struct CaptureBuffer {
    buffer: glow::Buffer,
    float_capacity: usize,
}

impl CaptureBuffer {
    /// Allocates a buffer for `vertex_count` captured vertices of
    /// `components_per_vertex` floats each.
    ///
    /// # Errors
    ///
    /// Returns the GL error string if the buffer cannot be created.
    #[allow(unsafe_code)]
    pub fn new(
        gl: &glow::Context,
        vertex_count: usize,
        components_per_vertex: usize,
    ) -> Result<Self, String> {
        use glow::HasContext;

        let float_capacity = vertex_count * components_per_vertex;

        // SAFETY: glow exposes raw GL entry points as unsafe. Storage is
        // allocated without initial data at the computed byte size.
        let buffer = unsafe { gl.create_buffer()? };
        unsafe {
            gl.bind_buffer(glow::TRANSFORM_FEEDBACK_BUFFER, Some(buffer));
            gl.buffer_data_size(
                glow::TRANSFORM_FEEDBACK_BUFFER,
                (float_capacity * std::mem::size_of::<f32>()) as i32,
                glow::STREAM_READ,
            );
            gl.bind_buffer(glow::TRANSFORM_FEEDBACK_BUFFER, None);
        }

        Ok(Self {
            buffer,
            float_capacity,
        })
    }

    /// Binds this buffer to transform-feedback slot 0, discards
    /// rasterization, and begins recording point primitives. Pair with
    /// [`CaptureBuffer::end`] around a non-indexed draw.
    #[allow(unsafe_code)]
    pub fn begin(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.buffer is a valid handle from new().
        unsafe {
            gl.bind_buffer_base(glow::TRANSFORM_FEEDBACK_BUFFER, 0, Some(self.buffer));
            gl.enable(glow::RASTERIZER_DISCARD);
            gl.begin_transform_feedback(glow::POINTS);
        }
    }

    /// Stops recording and re-enables rasterization.
    #[allow(unsafe_code)]
    pub fn end(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: only called after begin() on the same context.
        unsafe {
            gl.end_transform_feedback();
            gl.disable(glow::RASTERIZER_DISCARD);
            gl.bind_buffer_base(glow::TRANSFORM_FEEDBACK_BUFFER, 0, None);
        }
    }

    /// Reads the captured floats back into `out`.
    ///
    /// # Errors
    ///
    /// Returns an error string if `out` is larger than the buffer.
    #[allow(unsafe_code)]
    pub fn read(&self, gl: &glow::Context, out: &mut [f32]) -> Result<(), String> {
        use glow::HasContext;

        if out.len() > self.float_capacity {
            return Err(format!(
                "requested {} floats from a capture buffer of {}",
                out.len(),
                self.float_capacity
            ));
        }

        // SAFETY: the destination slice is within the buffer's allocated
        // size, and f32 accepts any bit pattern the GPU wrote.
        unsafe {
            let bytes = std::slice::from_raw_parts_mut(
                out.as_mut_ptr().cast::<u8>(),
                std::mem::size_of_val(out),
            );
            gl.bind_buffer(glow::TRANSFORM_FEEDBACK_BUFFER, Some(self.buffer));
            gl.get_buffer_sub_data(glow::TRANSFORM_FEEDBACK_BUFFER, 0, bytes);
            gl.bind_buffer(glow::TRANSFORM_FEEDBACK_BUFFER, None);
        }

        Ok(())
    }

    /// Capacity of the buffer in floats.
    pub fn float_capacity(&self) -> usize {
        self.float_capacity
    }

    /// Deletes the GPU buffer.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.buffer is a valid handle deleted exactly once.
        unsafe { gl.delete_buffer(self.buffer) };
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[ignore = "requires GL context"]
    fn new_allocates_vertex_count_times_components() {
        // Would test: CaptureBuffer::new(gl, 24, 4) has float_capacity 96.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn capture_pass_records_transformed_positions() {
        // Would test: after begin / draw_vertices_as_points / end, read()
        // returns the MVP-transformed positions of every vertex.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn read_rejects_oversized_destination() {
        // Would test: read() into a slice longer than the capacity errors.
    }
}
