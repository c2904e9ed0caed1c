//! Listing Image Core - image pipeline for marketplace listing photos
//!
//! This crate provides the image work behind a local-seller marketplace:
//! budget-driven JPEG compression of uploads before they are sent to a
//! vision model, photo enhancement for sellers, and cheap metadata probing.
//!
//! - [`compress`] - adaptive quality/width search for a size budget
//! - [`enhance`] - brightness, contrast, saturation, gamma, sharpen, upscale
//! - [`decode`] / [`encode`] - format sniffing, resampling, JPEG and PNG output
//! - [`classify`] - aspect and resolution classes of an upload

pub mod classify;
pub mod compress;
pub mod decode;
pub mod encode;
pub mod enhance;

pub use classify::{AspectClass, ImageShape, ResolutionClass};
pub use compress::{compress, CompressError, CompressedImage, CompressionPolicy, Compressor};
pub use decode::{read_metadata, DecodedImage, ImageFormat, ImageMetadata};
pub use enhance::{enhance, EnhanceError, EnhanceOptions, OutputFormat};
