//! Keepsake Core - image pipeline library
//!
//! This crate provides the image processing behind the Keepsake photo grids:
//! adaptive compression of user uploads to fit a small client-side store,
//! and palette extraction for theming. The pipeline speaks to a graphics
//! stack through the [`codec::ImageCodec`] capability, so everything here is
//! testable natively without a browser.

pub mod codec;
pub mod compress;
pub mod palette;

pub use codec::{CompressError, FilterType, ImageCodec, NativeCodec, Raster};
pub use compress::{
    compress, compress_data_url, decode_data_url, CompressionTarget, EncodedImage,
};
pub use palette::{extract_palette, Palette};
