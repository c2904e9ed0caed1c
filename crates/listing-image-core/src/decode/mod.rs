//! Image decoding pipeline.
//!
//! This module provides functionality for:
//! - Sniffing and decoding JPEG, PNG and WebP uploads to RGB pixels, with an
//!   optional separate alpha plane
//! - Reading header metadata (dimensions, format, EXIF orientation) cheaply
//! - Resampling decoded images
//!
//! All operations are synchronous and hold no shared state, so they are safe
//! to call from any number of threads at once.

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, decode_image_with_alpha, read_metadata};
pub use resize::{resize, resize_to_width, width_constrained_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, ImageFormat, ImageMetadata, Orientation};
