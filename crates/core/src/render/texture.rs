//! Texture helpers: a 1x1 solid-color placeholder created at setup, and
//! RGBA replacement once the host delivers the real image.
//!
//! The image itself arrives asynchronously from the host (a URL fetch in
//! the browser), so the first frames of a textured scene render with the
//! placeholder color.

/// Creates a 1x1 texture filled with `rgba` as a stand-in until the real
/// image arrives.
///
/// Wrap is `CLAMP_TO_EDGE`, filtering `LINEAR`, no mipmaps, so the
/// texture is complete and sampleable immediately.
///
/// # Errors
///
/// Returns the GL error string if the texture cannot be created.
#[allow(unsafe_code)]
pub fn placeholder_texture(gl: &glow::Context, rgba: [u8; 4]) -> Result<glow::Texture, String> {
    use glow::HasContext;

    // SAFETY: glow exposes raw GL entry points as unsafe. The texture is
    // created, configured, and filled with a valid 4-byte RGBA payload.
    let texture = unsafe { gl.create_texture()? };

    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
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
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            1,
            1,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(&rgba)),
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
    }

    Ok(texture)
}

/// Replaces `texture`'s contents with a full RGBA image, reallocating
/// storage at the new dimensions.
///
/// # Errors
///
/// Returns an error string if `pixels` does not hold exactly
/// `width * height * 4` bytes.
#[allow(unsafe_code)]
pub fn upload_rgba(
    gl: &glow::Context,
    texture: glow::Texture,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<(), String> {
    use glow::HasContext;

    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(format!(
            "pixel buffer holds {} bytes, expected {expected} for {width}x{height} RGBA",
            pixels.len()
        ));
    }

    // SAFETY: texture is a valid handle and the payload length was
    // checked against the declared dimensions above.
    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            width as i32,
            height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(pixels)),
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
    }

    Ok(())
}
