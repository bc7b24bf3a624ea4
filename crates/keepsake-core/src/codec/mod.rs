//! Image codec capability for the compression pipeline.
//!
//! The compressor never talks to a graphics stack directly; it goes through
//! the [`ImageCodec`] trait so the retry policy can be unit tested against an
//! in-memory fake with scripted encode sizes. [`NativeCodec`] is the real
//! implementation, backed by the `image` crate.
//!
//! All operations are synchronous and single-threaded; each call allocates
//! its own rasters, so concurrent calls share no mutable state.

mod native;
mod types;

pub use native::NativeCodec;
pub use types::{CompressError, FilterType, Orientation, Raster};

/// Capability interface over a real (or fake) graphics stack.
pub trait ImageCodec {
    /// Decode a raw image payload into an RGB raster.
    ///
    /// # Errors
    ///
    /// Returns [`CompressError::Decode`] if the payload is not a decodable
    /// raster image.
    fn decode(&self, bytes: &[u8]) -> Result<Raster, CompressError>;

    /// Render `source` into a freshly allocated raster at the given
    /// dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`CompressError::Render`] if an off-screen buffer cannot be
    /// produced (zero dimensions, pixel buffer mismatch).
    fn render_scaled(
        &self,
        source: &Raster,
        width: u32,
        height: u32,
        filter: FilterType,
    ) -> Result<Raster, CompressError>;

    /// Lossy-encode a raster. `quality` is in `[0, 1]`, 1 being highest.
    ///
    /// # Errors
    ///
    /// Returns [`CompressError::Render`] if the raster is invalid or the
    /// encoder fails.
    fn encode(&self, raster: &Raster, quality: f32) -> Result<Vec<u8>, CompressError>;
}
