//! `image`-crate backed codec with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use image::ExtendedColorType;
use image::ImageEncoder;
use image::ImageReader;

use super::{CompressError, FilterType, ImageCodec, Orientation, Raster};

/// Codec backed by the `image` crate.
///
/// Decodes any raster format the crate's enabled features cover (JPEG, PNG)
/// and encodes JPEG at a configurable quality.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec;

impl NativeCodec {
    /// Create a new codec. The codec itself is stateless.
    pub fn new() -> Self {
        Self
    }
}

impl ImageCodec for NativeCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, CompressError> {
        // Extract EXIF orientation before decoding
        let orientation = extract_orientation(bytes);

        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CompressError::Decode(e.to_string()))?;

        let img = reader
            .decode()
            .map_err(|e| CompressError::Decode(e.to_string()))?;

        let oriented = apply_orientation(img, orientation);
        Ok(Raster::from_rgb_image(oriented.into_rgb8()))
    }

    fn render_scaled(
        &self,
        source: &Raster,
        width: u32,
        height: u32,
        filter: FilterType,
    ) -> Result<Raster, CompressError> {
        if width == 0 || height == 0 {
            return Err(CompressError::Render(format!(
                "invalid target dimensions {width}x{height}"
            )));
        }

        // Fast path: if dimensions match, just clone
        if source.width == width && source.height == height {
            return Ok(source.clone());
        }

        let rgb_image = source.to_rgb_image().ok_or_else(|| {
            CompressError::Render("pixel buffer does not match raster dimensions".to_string())
        })?;

        let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

        Ok(Raster::from_rgb_image(resized))
    }

    fn encode(&self, raster: &Raster, quality: f32) -> Result<Vec<u8>, CompressError> {
        if raster.width == 0 || raster.height == 0 {
            return Err(CompressError::Render(format!(
                "invalid raster dimensions {}x{}",
                raster.width, raster.height
            )));
        }

        let expected_len = (raster.width as usize) * (raster.height as usize) * 3;
        if raster.pixels.len() != expected_len {
            return Err(CompressError::Render(format!(
                "invalid pixel data: expected {expected_len} bytes, got {}",
                raster.pixels.len()
            )));
        }

        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality_to_jpeg(quality));

        encoder
            .write_image(
                &raster.pixels,
                raster.width,
                raster.height,
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| CompressError::Render(e.to_string()))?;

        Ok(buffer.into_inner())
    }
}

/// Map the pipeline's `[0, 1]` quality domain onto the JPEG encoder's
/// 1-100 scale.
fn quality_to_jpeg(quality: f32) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
