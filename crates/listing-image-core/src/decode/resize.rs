//! Resampling helpers used by compression and enhancement.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero,
/// or `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// image's dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image
        .as_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer does not match dimensions".to_string()))?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resample an image to `max_width` pixels wide, preserving aspect ratio.
///
/// Images already at or below `max_width` are returned unchanged; this
/// never upscales.
pub fn resize_to_width(
    image: &DecodedImage,
    max_width: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_width == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: 0,
            height: image.height,
        });
    }

    let (width, height) = width_constrained_dimensions(image.width, image.height, max_width);
    resize(image, width, height, filter)
}

/// Dimensions an image of `width x height` takes when constrained to `max_width`.
///
/// Height is scaled by the same ratio and rounded, never below 1.
pub fn width_constrained_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_width {
        return (width, height);
    }

    let scale = max_width as f64 / width as f64;
    let new_height = (height as f64 * scale).round() as u32;
    (max_width, new_height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::gradient_image;

    #[test]
    fn test_resize_basic() {
        let img = gradient_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = gradient_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();
        assert_eq!(resized.pixels, img.pixels);
    }

    #[test]
    fn test_resize_upscale() {
        let img = gradient_image(50, 25);
        let resized = resize(&img, 100, 50, FilterType::Lanczos3).unwrap();

        assert_eq!((resized.width, resized.height), (100, 50));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = gradient_image(100, 50);

        assert!(matches!(
            resize(&img, 0, 50, FilterType::Bilinear),
            Err(DecodeError::InvalidDimensions { .. })
        ));
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_mismatched_buffer() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 12],
        };
        assert!(matches!(
            resize(&img, 5, 5, FilterType::Nearest),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_resize_to_width_downscales_wide_image() {
        let img = gradient_image(2000, 1000);
        let resized = resize_to_width(&img, 1024, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 1024);
        assert_eq!(resized.height, 512);
    }

    #[test]
    fn test_resize_to_width_never_upscales() {
        let img = gradient_image(600, 400);
        let resized = resize_to_width(&img, 1024, FilterType::Bilinear).unwrap();

        assert_eq!((resized.width, resized.height), (600, 400));
    }

    #[test]
    fn test_resize_to_width_portrait() {
        let img = gradient_image(1000, 3000);
        let resized = resize_to_width(&img, 512, FilterType::Nearest).unwrap();

        assert_eq!(resized.width, 512);
        assert_eq!(resized.height, 1536);
    }

    #[test]
    fn test_resize_to_width_zero_error() {
        let img = gradient_image(10, 10);
        assert!(resize_to_width(&img, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_width_constrained_dimensions() {
        assert_eq!(width_constrained_dimensions(2000, 1000, 1024), (1024, 512));
        assert_eq!(width_constrained_dimensions(6000, 4000, 896), (896, 597));
        assert_eq!(width_constrained_dimensions(600, 400, 1024), (600, 400));
        assert_eq!(width_constrained_dimensions(600, 400, 600), (600, 400));
        assert_eq!(width_constrained_dimensions(0, 0, 256), (0, 0));
    }

    #[test]
    fn test_width_constrained_extreme_panorama_keeps_one_row() {
        assert_eq!(width_constrained_dimensions(100_000, 10, 512), (512, 1));
    }

    #[test]
    fn test_all_filter_types() {
        let img = gradient_image(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&img, 50, 25, filter).unwrap();
            assert_eq!((resized.width, resized.height), (50, 25));
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: constrained width never exceeds the source or the limit.
        #[test]
        fn prop_never_upscales(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            max_width in 1u32..=4096,
        ) {
            let (w, h) = width_constrained_dimensions(width, height, max_width);
            prop_assert!(w <= width);
            prop_assert!(w <= max_width);
            prop_assert!(h >= 1);
            prop_assert!(h <= height);
        }

        /// Property: aspect ratio is preserved within rounding.
        #[test]
        fn prop_preserves_aspect_ratio(
            width in 64u32..=8000,
            height in 64u32..=8000,
            max_width in 32u32..=2048,
        ) {
            let (w, h) = width_constrained_dimensions(width, height, max_width);
            let expected = height as f64 * w as f64 / width as f64;
            prop_assert!((h as f64 - expected).abs() <= 1.0);
        }
    }
}
