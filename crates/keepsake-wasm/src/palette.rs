//! Palette extraction WASM bindings.
//!
//! Exposes dominant-color extraction so the site can theme itself around an
//! uploaded photo. The result serializes to
//! `{ mainColor, secondaryColor, accentColor }`.

use keepsake_core::{decode_data_url, ImageCodec, NativeCodec};
use wasm_bindgen::prelude::*;

/// Extract a three-color theme palette from a data-URL payload.
///
/// # Errors
///
/// Returns an error if the payload is not a data URL or not a decodable
/// image.
#[wasm_bindgen]
pub fn extract_palette(data_url: &str) -> Result<JsValue, JsValue> {
    let bytes = decode_data_url(data_url).map_err(|e| JsValue::from_str(&e.to_string()))?;
    palette_from_bytes(&bytes)
}

/// Extract a three-color theme palette from raw image bytes.
#[wasm_bindgen]
pub fn extract_palette_from_bytes(bytes: &[u8]) -> Result<JsValue, JsValue> {
    palette_from_bytes(bytes)
}

fn palette_from_bytes(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let raster = NativeCodec::new()
        .decode(bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let palette = keepsake_core::extract_palette(&raster)
        .ok_or_else(|| JsValue::from_str("image has no pixels"))?;

    serde_wasm_bindgen::to_value(&palette).map_err(|e| JsValue::from_str(&e.to_string()))
}
