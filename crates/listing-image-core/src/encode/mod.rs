//! Image encoding pipeline.
//!
//! - JPEG with configurable quality, used by compression and enhancement
//! - Lossless PNG, used when a seller asks for PNG enhancement output
//!
//! Encoders take tightly packed RGB8 rows; PNG also accepts RGBA8 so
//! transparent uploads keep their alpha channel.

mod jpeg;
mod png;

use thiserror::Error;

pub use jpeg::{encode_jpeg, MAX_JPEG_QUALITY, MIN_JPEG_QUALITY};
pub use png::{encode_png, encode_png_rgba};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes for the dimensions, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

fn validate_rgb(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    validate_pixels(pixels, width, height, 3)
}

fn validate_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * channels;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
