//! WASM-compatible wrapper types.
//!
//! These wrap core results in JavaScript-friendly shapes: a class with
//! getters for compression output, and plain serializable structs that
//! cross the boundary as JS objects via `serde-wasm-bindgen`.

use listing_image_core::decode::{DecodeError, ImageMetadata, Orientation};
use listing_image_core::{CompressedImage, ImageFormat, ImageShape};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Result of compressing an image for upload.
///
/// # Memory Management
///
/// The JPEG bytes live in WASM memory. `bytes()` copies them into a fresh
/// `Uint8Array` on each call, so read it once and keep the JS copy.
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsCompressedImage {
    inner: CompressedImage,
}

#[wasm_bindgen]
impl JsCompressedImage {
    /// JPEG-encoded bytes
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// JPEG quality of the returned attempt
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> u8 {
        self.inner.quality
    }

    /// Number of encode attempts made
    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.inner.attempts
    }

    /// Output size in kilobytes (1 KB = 1024 bytes)
    #[wasm_bindgen(getter)]
    pub fn size_kb(&self) -> f64 {
        self.inner.size_kb()
    }

    /// False when even the smallest setting exceeded the budget
    #[wasm_bindgen(getter)]
    pub fn within_budget(&self) -> bool {
        self.inner.within_budget
    }
}

impl From<CompressedImage> for JsCompressedImage {
    fn from(inner: CompressedImage) -> Self {
        Self { inner }
    }
}

/// Header facts and shape classes of an upload, serialized to a JS object.
///
/// Field names stay snake_case, like the policy and option objects the
/// other bindings accept, so nested `shape` fields match the outer ones.
#[derive(Debug, Clone, Serialize)]
pub struct ImageInfo {
    /// Upright width (EXIF orientation applied)
    pub width: u32,
    /// Upright height (EXIF orientation applied)
    pub height: u32,
    pub format: ImageFormat,
    pub mime_type: &'static str,
    pub orientation: Orientation,
    pub shape: ImageShape,
}

impl ImageInfo {
    pub fn from_metadata(meta: &ImageMetadata) -> Self {
        let (width, height) = meta.oriented_dimensions();
        Self {
            width,
            height,
            format: meta.format,
            mime_type: meta.format.mime_type(),
            orientation: meta.orientation,
            shape: ImageShape::from_dimensions(width, height),
        }
    }

    pub fn probe(bytes: &[u8]) -> Result<Self, DecodeError> {
        listing_image_core::read_metadata(bytes).map(|meta| Self::from_metadata(&meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_image_core::classify::{AspectClass, ResolutionClass};
    use listing_image_core::encode::encode_png;

    fn sample_result() -> CompressedImage {
        CompressedImage {
            bytes: vec![0u8; 2048],
            width: 1024,
            height: 512,
            quality: 70,
            attempts: 2,
            within_budget: true,
        }
    }

    #[test]
    fn test_compressed_image_getters() {
        let js = JsCompressedImage::from(sample_result());
        assert_eq!(js.width(), 1024);
        assert_eq!(js.height(), 512);
        assert_eq!(js.quality(), 70);
        assert_eq!(js.attempts(), 2);
        assert_eq!(js.size_kb(), 2.0);
        assert!(js.within_budget());
        assert_eq!(js.bytes().len(), 2048);
    }

    #[test]
    fn test_image_info_applies_orientation() {
        let meta = ImageMetadata {
            width: 4000,
            height: 3000,
            format: ImageFormat::Jpeg,
            orientation: Orientation::Rotate90CW,
        };
        let info = ImageInfo::from_metadata(&meta);

        assert_eq!((info.width, info.height), (3000, 4000));
        assert_eq!(info.mime_type, "image/jpeg");
        assert_eq!(info.shape.aspect, AspectClass::Portrait);
        assert_eq!(info.shape.resolution, ResolutionClass::High);
    }

    #[test]
    fn test_image_info_probe_png() {
        let png = encode_png(&vec![200u8; 60 * 30 * 3], 60, 30).unwrap();
        let info = ImageInfo::probe(&png).unwrap();

        assert_eq!(info.format, ImageFormat::Png);
        assert_eq!((info.width, info.height), (60, 30));
        assert_eq!(info.shape.aspect, AspectClass::Landscape);
    }

    #[test]
    fn test_image_info_uses_snake_case_throughout() {
        let meta = ImageMetadata {
            width: 1200,
            height: 800,
            format: ImageFormat::Png,
            orientation: Orientation::Normal,
        };
        let value = serde_json::to_value(ImageInfo::from_metadata(&meta)).unwrap();

        assert_eq!(value["mime_type"], "image/png");
        assert!(value.get("mimeType").is_none());
        assert_eq!(value["shape"]["aspect_ratio"], 1.5);
    }

    #[test]
    fn test_image_info_probe_empty() {
        assert!(ImageInfo::probe(&[]).is_err());
    }
}
