//! The image operations the compression loop depends on.

use thiserror::Error;

use crate::decode::{self, DecodeError, DecodedImage, FilterType};
use crate::encode::{self, EncodeError};

/// Failure inside a codec operation.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Decode, resample and JPEG-encode capability used by [`super::Compressor`].
///
/// Implementations must be stateless across calls (or internally
/// synchronized) for a shared compressor to be used from several threads.
pub trait Codec {
    /// Decoded raster the codec resamples and encodes.
    type Image;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, CodecError>;

    /// `(width, height)` of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> (u32, u32);

    /// Resample to `width` pixels wide, preserving aspect ratio.
    ///
    /// Only called with `width` strictly below the source width.
    fn resample(&self, image: &Self::Image, width: u32) -> Result<Self::Image, CodecError>;

    fn encode_jpeg(&self, image: &Self::Image, quality: u8) -> Result<Vec<u8>, CodecError>;
}

/// [`Codec`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec {
    filter: FilterType,
}

impl ImageCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different resampling filter (Lanczos3 by default).
    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Codec for ImageCodec {
    type Image = DecodedImage;

    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, CodecError> {
        Ok(decode::decode_image(bytes)?)
    }

    fn dimensions(&self, image: &DecodedImage) -> (u32, u32) {
        (image.width, image.height)
    }

    fn resample(&self, image: &DecodedImage, width: u32) -> Result<DecodedImage, CodecError> {
        Ok(decode::resize_to_width(image, width, self.filter)?)
    }

    fn encode_jpeg(&self, image: &DecodedImage, quality: u8) -> Result<Vec<u8>, CodecError> {
        Ok(encode::encode_jpeg(
            &image.pixels,
            image.width,
            image.height,
            quality,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{gradient_image, png_bytes};

    #[test]
    fn test_image_codec_round_trip() {
        let codec = ImageCodec::new();
        let source = codec.decode(&png_bytes(&gradient_image(300, 150))).unwrap();
        assert_eq!(codec.dimensions(&source), (300, 150));

        let smaller = codec.resample(&source, 100).unwrap();
        assert_eq!(codec.dimensions(&smaller), (100, 50));

        let jpeg = codec.encode_jpeg(&smaller, 80).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_image_codec_decode_error_message() {
        let err = ImageCodec::new().decode(&[]).unwrap_err();
        assert!(matches!(err, CodecError::Decode(DecodeError::EmptyBuffer)));
        assert_eq!(err.to_string(), "Image buffer is empty");
    }

    #[test]
    fn test_custom_filter() {
        let codec = ImageCodec::with_filter(FilterType::Nearest);
        let source = gradient_image(64, 64);
        let resampled = codec.resample(&source, 16).unwrap();
        assert_eq!(codec.dimensions(&resampled), (16, 16));
    }
}
