//! PNG encoding
//!
//! Encodes finished cards with the `image` crate.

use image::{ImageBuffer, ImageEncoder, RgbaImage};

use annocard_core::{error::PersistError, types::RasterImage};

/// Encode a straight-RGBA card to PNG bytes.
///
/// Returns a valid PNG with proper IHDR, IDAT, and IEND chunks.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, PersistError> {
    let expected_size = image.width as usize * image.height as usize * 4;
    if image.width == 0 || image.height == 0 || image.data.len() != expected_size {
        return Err(PersistError::EncodingFailed(format!(
            "Buffer mismatch: expected {} bytes for {}x{} RGBA, got {}",
            expected_size,
            image.width,
            image.height,
            image.data.len()
        )));
    }

    let buffer: RgbaImage = ImageBuffer::from_raw(image.width, image.height, image.data.clone())
        .ok_or_else(|| {
            PersistError::EncodingFailed("Failed to create image buffer from RGBA data".into())
        })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(
            buffer.as_raw(),
            image.width,
            image.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| PersistError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}
