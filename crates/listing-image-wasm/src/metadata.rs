//! Metadata probe WASM binding.

use crate::types::ImageInfo;
use wasm_bindgen::prelude::*;

/// Read dimensions, format, orientation and shape classes without decoding pixels.
///
/// Returns an object like
/// `{ width, height, format: "jpeg", mime_type, orientation, shape: { aspect, resolution, aspect_ratio, megapixels } }`.
#[wasm_bindgen]
pub fn read_image_metadata(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let info = ImageInfo::probe(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&info).map_err(|e| JsValue::from_str(&e.to_string()))
}
