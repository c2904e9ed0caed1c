//! JPEG encoding.
//!
//! Every compression attempt and every JPEG enhancement result goes through
//! here. Quality is the main lever the compressor pulls to meet a size budget.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_rgb, EncodeError};

/// Lowest JPEG quality accepted by the encoder.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Highest JPEG quality accepted by the encoder.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
///
/// # Quality Guidelines
///
/// * 90: enhancement default, listing photos shown at full size
/// * 80: first compression attempt before a vision model upload
/// * 20: compression floor, visible artifacts but still legible
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;

    let quality = quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
