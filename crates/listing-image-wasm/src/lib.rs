//! Listing Image WASM - WebAssembly bindings for listing-image-core
//!
//! Exposes compression, enhancement and metadata probing to the marketplace
//! front end, so photos can be shrunk and previewed before upload.
//!
//! # Module Structure
//!
//! - `compress` - budget-driven JPEG compression
//! - `enhance` - brightness/contrast/saturation/gamma/sharpen/upscale
//! - `metadata` - header probe and shape classes
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image, read_image_metadata } from '@listing-image/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const info = read_image_metadata(bytes);
//! const upload = compress_image(bytes, 1000);
//! console.log(`${info.width}x${info.height} -> ${upload.size_kb.toFixed(2)}KB`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod enhance;
mod metadata;
mod types;

pub use compress::{compress_image, compress_image_with_policy, default_compression_policy};
pub use enhance::{default_enhance_options, enhance_image, output_mime_type};
pub use metadata::read_image_metadata;
pub use types::{ImageInfo, JsCompressedImage};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
