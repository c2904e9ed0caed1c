//! PNG encoding for enhancement results that must stay lossless.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::{validate_pixels, validate_rgb, EncodeError};

/// Encode RGB pixel data to PNG bytes.
///
/// Uses the encoder's default deflate level with adaptive row filtering,
/// the same balance zlib level 6 gives.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;
    write_png(pixels, width, height, ExtendedColorType::Rgb8)
}

/// Encode RGBA pixel data (4 bytes per pixel, straight alpha) to PNG bytes.
pub fn encode_png_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_pixels(pixels, width, height, 4)?;
    write_png(pixels, width, height, ExtendedColorType::Rgba8)
}

fn write_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    color: ExtendedColorType,
) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Default, PngFilter::Adaptive);

    encoder
        .write_image(pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;
    use crate::testing::gradient_image;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let img = gradient_image(16, 16);
        let png = encode_png(&img.pixels, 16, 16).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_is_lossless() {
        let img = gradient_image(33, 17);
        let png = encode_png(&img.pixels, img.width, img.height).unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.pixels, img.pixels);
    }

    #[test]
    fn test_encode_png_rgba_keeps_alpha() {
        let pixels = [10, 20, 30, 255, 40, 50, 60, 0];
        let png = encode_png_rgba(&pixels, 2, 1).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert!(decoded.color().has_alpha());
        assert_eq!(decoded.to_rgba8().into_raw(), pixels);
    }

    #[test]
    fn test_encode_png_rejects_bad_input() {
        assert!(matches!(
            encode_png(&[0u8; 5], 2, 1),
            Err(EncodeError::InvalidPixelData { expected: 6, actual: 5 })
        ));
        assert!(matches!(
            encode_png_rgba(&[0u8; 6], 2, 1),
            Err(EncodeError::InvalidPixelData { expected: 8, actual: 6 })
        ));
        assert!(matches!(
            encode_png(&[], 0, 0),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}
