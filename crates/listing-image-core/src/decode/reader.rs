//! Format-sniffing decode with EXIF orientation handling.
//!
//! Listing photos arrive straight from phones and cameras, so the stored
//! pixel grid is frequently rotated relative to how the seller saw it.
//! Decoding applies the EXIF orientation so every later stage works on
//! upright pixels.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, GrayImage, ImageReader, Luma};

use super::{DecodeError, DecodedImage, ImageFormat, ImageMetadata, Orientation};

/// Decode an encoded image (JPEG, PNG or WebP) to upright RGB pixels.
///
/// # Errors
///
/// * `DecodeError::EmptyBuffer` for a zero-length input.
/// * `DecodeError::InvalidFormat` if the format cannot be recognized.
/// * `DecodeError::CorruptedFile` if the codec rejects the data.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let oriented = decode_oriented(bytes)?;
    Ok(DecodedImage::from_rgb_image(oriented.into_rgb8()))
}

/// Decode like [`decode_image`], also returning the alpha channel when the
/// source has one.
///
/// The alpha plane has the same upright dimensions as the RGB pixels. Sources
/// without alpha (JPEG, RGB PNG) return `None`.
pub fn decode_image_with_alpha(
    bytes: &[u8],
) -> Result<(DecodedImage, Option<GrayImage>), DecodeError> {
    let oriented = decode_oriented(bytes)?;

    let alpha = oriented.color().has_alpha().then(|| {
        let rgba = oriented.to_rgba8();
        GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            Luma([rgba.get_pixel(x, y).0[3]])
        })
    });

    Ok((DecodedImage::from_rgb_image(oriented.into_rgb8()), alpha))
}

/// Read dimensions, format and orientation without decoding pixel data.
pub fn read_metadata(bytes: &[u8]) -> Result<ImageMetadata, DecodeError> {
    let reader = open_reader(bytes)?;
    let format = reader
        .format()
        .and_then(ImageFormat::from_image_format)
        .ok_or(DecodeError::InvalidFormat)?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(ImageMetadata {
        width,
        height,
        format,
        orientation: extract_orientation(bytes),
    })
}

fn decode_oriented(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let img = open_reader(bytes)?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(apply_orientation(img, extract_orientation(bytes)))
}

fn open_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyBuffer);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    match reader.format().and_then(ImageFormat::from_image_format) {
        Some(_) => Ok(reader),
        None => Err(DecodeError::InvalidFormat),
    }
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{gradient_image, jpeg_bytes, png_bytes};

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(&gradient_image(12, 8));
        let img = decode_image(&bytes).unwrap();

        assert_eq!(img.width, 12);
        assert_eq!(img.height, 8);
        assert_eq!(img.pixels.len(), 12 * 8 * 3);
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let source = gradient_image(5, 5);
        let img = decode_image(&png_bytes(&source)).unwrap();
        assert_eq!(img.pixels, source.pixels);
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = jpeg_bytes(&gradient_image(40, 30), 85);
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (40, 30));
    }

    #[test]
    fn test_decode_with_alpha_rgba_png() {
        let rgba = image::RgbaImage::from_raw(2, 1, vec![200, 10, 10, 255, 0, 0, 0, 0]).unwrap();
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(rgba)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let (img, alpha) = decode_image_with_alpha(&bytes).unwrap();
        assert_eq!(img.pixels, vec![200, 10, 10, 0, 0, 0]);
        assert_eq!(alpha.unwrap().into_raw(), vec![255, 0]);
    }

    #[test]
    fn test_decode_with_alpha_opaque_sources() {
        let (img, alpha) = decode_image_with_alpha(&png_bytes(&gradient_image(6, 4))).unwrap();
        assert_eq!((img.width, img.height), (6, 4));
        assert!(alpha.is_none());

        let (_, alpha) = decode_image_with_alpha(&jpeg_bytes(&gradient_image(6, 4), 80)).unwrap();
        assert!(alpha.is_none());
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::EmptyBuffer)));
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        // SOI plus a partial APP0 header
        let bytes = jpeg_bytes(&gradient_image(64, 64), 90);
        let result = decode_image(&bytes[..20]);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_metadata_png() {
        let bytes = png_bytes(&gradient_image(300, 200));
        let meta = read_metadata(&bytes).unwrap();

        assert_eq!(meta.width, 300);
        assert_eq!(meta.height, 200);
        assert_eq!(meta.format, ImageFormat::Png);
        assert_eq!(meta.orientation, Orientation::Normal);
    }

    #[test]
    fn test_read_metadata_jpeg() {
        let bytes = jpeg_bytes(&gradient_image(64, 32), 80);
        let meta = read_metadata(&bytes).unwrap();
        assert_eq!(meta.format, ImageFormat::Jpeg);
        assert_eq!(meta.oriented_dimensions(), (64, 32));
    }

    #[test]
    fn test_read_metadata_empty() {
        assert!(matches!(read_metadata(&[]), Err(DecodeError::EmptyBuffer)));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let bytes = jpeg_bytes(&gradient_image(8, 8), 80);
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let rgb_img = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb_img), Orientation::Rotate90CW);

        assert_eq!(result.into_rgb8().dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let rgb_img = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb_img), Orientation::Rotate180);
        let rgb = result.into_rgb8();

        assert_eq!(rgb.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb_img = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result =
            apply_orientation(DynamicImage::ImageRgb8(rgb_img), Orientation::FlipHorizontal);
        let rgb = result.into_rgb8();

        assert_eq!(rgb.get_pixel(0, 0).0, [0, 255, 0]);
    }
}
