//! WASM-compatible wrapper types for pipeline artifacts.

use keepsake_core::EncodedImage;
use wasm_bindgen::prelude::*;

/// A compressed-image artifact wrapper for JavaScript.
///
/// Wraps the core `EncodedImage` and exposes its dimensions, payload, and
/// data-URL serialization. The encoded bytes live in WASM memory; `bytes()`
/// copies them out as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsEncodedImage {
    inner: EncodedImage,
}

#[wasm_bindgen]
impl JsEncodedImage {
    /// Final raster width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Final raster height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// MIME type of the encoded payload (e.g. "image/jpeg")
    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.inner.mime.to_string()
    }

    /// Number of raw encoded bytes (before base64 expansion)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes.len()
    }

    /// Length of the serialized data URL, the figure the storage budget
    /// is measured against
    #[wasm_bindgen(getter)]
    pub fn serialized_length(&self) -> usize {
        self.inner.serialized_len()
    }

    /// Returns the encoded bytes as a Uint8Array (copies out of WASM memory)
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// Serialize as a `data:<mime>;base64,<payload>` string, ready for the
    /// key-value store
    pub fn to_data_url(&self) -> String {
        self.inner.to_data_url()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsEncodedImage {
    /// Wrap a core artifact. Internal constructor used by the bindings.
    pub(crate) fn from_encoded(inner: EncodedImage) -> Self {
        Self { inner }
    }
}
