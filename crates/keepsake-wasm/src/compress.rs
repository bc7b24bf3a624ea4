//! Compression WASM bindings.
//!
//! This module exposes the keepsake-core compressor to JavaScript. Options
//! arrive as a plain object with the same field names and defaults the site
//! used (`maxWidth`, `maxHeight`, `targetBytes`, `initialQuality`,
//! `minQuality`, `qualityStep`, `shrinkFactor`); every field is optional.
//!
//! # Example
//!
//! ```typescript
//! import { compress_image, compress_bytes } from '@keepsake/wasm';
//!
//! // From a FileReader data URL, straight back into the store
//! const stored = compress_image(dataUrl, { targetBytes: 800 * 1024 });
//!
//! // From raw file bytes, keeping the artifact metadata
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const artifact = compress_bytes(bytes, undefined);
//! console.log(`${artifact.width}x${artifact.height}`);
//! ```

use keepsake_core::{compress, compress_data_url, CompressionTarget, NativeCodec};
use wasm_bindgen::prelude::*;

use crate::types::JsEncodedImage;

/// Parse the options object, treating `undefined`/`null` as "all defaults".
fn parse_target(options: JsValue) -> Result<CompressionTarget, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(CompressionTarget::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compress a data-URL payload and return the artifact as a data URL.
///
/// This is the upload path: the file reader hands over a
/// `data:<mime>;base64,` string, and the returned string goes straight into
/// the per-slot key-value store.
///
/// # Errors
///
/// Returns an error if the payload is not a data URL, is not a decodable
/// image, or an off-screen raster cannot be produced. No partial result is
/// returned; the caller should keep the previously stored value.
#[wasm_bindgen]
pub fn compress_image(data_url: &str, options: JsValue) -> Result<String, JsValue> {
    let target = parse_target(options)?;
    let stored = compress_data_url(&NativeCodec::new(), data_url, &target)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    web_sys::console::log_1(&format!("compressed upload to {} chars", stored.len()).into());
    Ok(stored)
}

/// Compress raw image bytes and return the artifact with its metadata.
///
/// Use this when the caller wants the final dimensions or the raw encoded
/// bytes instead of a serialized data URL.
#[wasm_bindgen]
pub fn compress_bytes(bytes: &[u8], options: JsValue) -> Result<JsEncodedImage, JsValue> {
    let target = parse_target(options)?;
    compress(&NativeCodec::new(), bytes, &target)
        .map(JsEncodedImage::from_encoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
