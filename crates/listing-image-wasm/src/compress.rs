//! Compression WASM bindings.
//!
//! Lets the browser shrink a photo before uploading it, using the same
//! quality/width search the server applies before calling the vision model.
//!
//! # Example
//!
//! ```typescript
//! import { compress_image } from '@listing-image/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, 1000);
//! const blob = new Blob([result.bytes()], { type: 'image/jpeg' });
//! ```

use crate::types::JsCompressedImage;
use listing_image_core::compress::{CompressError, CompressionPolicy, Compressor};
use wasm_bindgen::prelude::*;

/// Compress an image to at most `budget_kb` kilobytes of JPEG.
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded or `budget_kb` is zero.
/// Reaching the smallest setting over budget is not an error; check
/// `within_budget` on the result.
#[wasm_bindgen]
pub fn compress_image(bytes: &[u8], budget_kb: u32) -> Result<JsCompressedImage, JsValue> {
    run(bytes, budget_kb, CompressionPolicy::default()).map_err(to_js_error)
}

/// Compress with a custom policy object.
///
/// Field names are snake_case, e.g. `{ initial_width: 1600 }`. Missing fields
/// take their defaults; `null` or `undefined` means the default policy.
#[wasm_bindgen]
pub fn compress_image_with_policy(
    bytes: &[u8],
    budget_kb: u32,
    policy: JsValue,
) -> Result<JsCompressedImage, JsValue> {
    let policy: CompressionPolicy = if policy.is_undefined() || policy.is_null() {
        CompressionPolicy::default()
    } else {
        serde_wasm_bindgen::from_value(policy).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    run(bytes, budget_kb, policy).map_err(to_js_error)
}

/// Default policy as a JS object, for display or as a starting point.
#[wasm_bindgen]
pub fn default_compression_policy() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CompressionPolicy::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn run(
    bytes: &[u8],
    budget_kb: u32,
    policy: CompressionPolicy,
) -> Result<JsCompressedImage, CompressError> {
    let result = Compressor::new().with_policy(policy).compress(bytes, budget_kb)?;
    if !result.within_budget {
        warn_over_budget(result.size_kb(), budget_kb);
    }
    Ok(result.into())
}

fn to_js_error(err: CompressError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(target_arch = "wasm32")]
fn warn_over_budget(size_kb: f64, budget_kb: u32) {
    web_sys::console::warn_1(&JsValue::from_str(&format!(
        "Compressed image is {size_kb:.2}KB, over the {budget_kb}KB budget"
    )));
}

// Console imports are only callable inside a wasm runtime.
#[cfg(not(target_arch = "wasm32"))]
fn warn_over_budget(_size_kb: f64, _budget_kb: u32) {}
