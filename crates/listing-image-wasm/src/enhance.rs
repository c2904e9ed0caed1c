//! Enhancement WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { enhance_image } from '@listing-image/wasm';
//!
//! const out = enhance_image(bytes, { brightness: 1.1, sharpness: 0.5 }, 'png');
//! ```

use listing_image_core::enhance::{enhance, EnhanceOptions, OutputFormat};
use wasm_bindgen::prelude::*;

/// Enhance an image and re-encode it as `format` ("jpeg", "jpg" or "png").
///
/// `options` is a plain object with any of `brightness`, `contrast`,
/// `saturation`, `sharpness`, `gamma`, `quality`, `upscale`; omitted fields
/// use the defaults, and `null`/`undefined` uses all defaults.
#[wasm_bindgen]
pub fn enhance_image(bytes: &[u8], options: JsValue, format: &str) -> Result<Vec<u8>, JsValue> {
    let options: EnhanceOptions = if options.is_undefined() || options.is_null() {
        EnhanceOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    let format: OutputFormat = format
        .parse()
        .map_err(|e: listing_image_core::EnhanceError| JsValue::from_str(&e.to_string()))?;

    enhance(bytes, &options, format).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Default enhancement options as a JS object.
#[wasm_bindgen]
pub fn default_enhance_options() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&EnhanceOptions::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type for an output format name, for building data URLs.
#[wasm_bindgen]
pub fn output_mime_type(format: &str) -> Option<String> {
    format
        .parse::<OutputFormat>()
        .ok()
        .map(|f| f.mime_type().to_string())
}
