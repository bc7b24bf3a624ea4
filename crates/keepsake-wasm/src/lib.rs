//! Keepsake WASM - WebAssembly bindings for the Keepsake image pipeline
//!
//! This crate exposes the keepsake-core functionality to the site's
//! JavaScript/TypeScript: adaptive upload compression and theme palette
//! extraction.
//!
//! # Module Structure
//!
//! - `compress` - Adaptive image compression bindings
//! - `palette` - Dominant-color extraction bindings
//! - `types` - WASM-compatible wrapper types for artifacts
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image } from '@keepsake/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! // Compress a FileReader result and store it
//! const stored = compress_image(reader.result as string, undefined);
//! localStorage.setItem(`grid-${slot}`, stored);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod palette;
mod types;

// Re-export public types
pub use compress::{compress_bytes, compress_image};
pub use palette::{extract_palette, extract_palette_from_bytes};
pub use types::JsEncodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
