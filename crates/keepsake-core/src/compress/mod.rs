//! Adaptive image compression for grid uploads.
//!
//! Takes an arbitrary user-supplied raster and produces a size-bounded,
//! dimension-bounded JPEG artifact suitable for a small client-side store.
//! The policy is a fit pass plus a two-phase retry with a hard work ceiling:
//!
//! 1. **Fit**: a single aspect-preserving scale so neither edge exceeds its
//!    bound (never upscales), rendered with high-quality interpolation.
//! 2. **Quality ladder**: re-encode the same scaled raster at stepwise lower
//!    quality until the serialized artifact fits the byte budget or the
//!    ladder bottoms out.
//! 3. **Dimension shrink**: if still over budget, exactly one shrink of both
//!    edges, re-rendered from the source raster and re-encoded at the last
//!    ladder quality. The result is final regardless of size.
//!
//! Worst-case work is a small constant number of re-encodes independent of
//! input size, trading a possible final-size overshoot for predictable
//! latency on an upload-blocking path.

mod artifact;

pub use artifact::{decode_data_url, EncodedImage, MIME_JPEG};

use serde::{Deserialize, Serialize};

use crate::codec::{CompressError, FilterType, ImageCodec};

/// Bounds and retry policy for one compression call.
///
/// Every field is optional on the wire and defaults to the values used by
/// the photo grids: 800px edges, an 800KB serialized budget, and a
/// 0.9 -> 0.5 quality ladder in steps of 0.1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionTarget {
    /// Maximum output width in pixels.
    pub max_width: u32,
    /// Maximum output height in pixels.
    pub max_height: u32,
    /// Budget for the serialized artifact, in bytes.
    pub target_bytes: usize,
    /// First quality tried, in `[0, 1]`.
    pub initial_quality: f32,
    /// Quality ladder floor.
    pub min_quality: f32,
    /// Quality ladder decrement.
    pub quality_step: f32,
    /// One-shot dimension multiplier applied when the ladder bottoms out.
    pub shrink_factor: f32,
}

impl Default for CompressionTarget {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 800,
            target_bytes: 800 * 1024,
            initial_quality: 0.9,
            min_quality: 0.5,
            quality_step: 0.1,
            shrink_factor: 0.9,
        }
    }
}

impl CompressionTarget {
    /// Number of ladder steps below the initial quality. With defaults this
    /// is 4, so at most 5 encode attempts happen before the shrink fallback.
    pub fn max_quality_steps(&self) -> u32 {
        if self.quality_step <= 0.0 {
            return 0;
        }
        let span = (self.initial_quality - self.min_quality).max(0.0);
        // Tolerate float drift so (0.9 - 0.5) / 0.1 yields exactly 4
        ((span / self.quality_step) + 1e-4).floor() as u32
    }

    /// Quality tried on ladder step `n` (step 0 is the initial encode),
    /// clamped at the floor.
    fn quality_at(&self, step: u32) -> f32 {
        (self.initial_quality - self.quality_step * step as f32).max(self.min_quality)
    }
}

/// Retry phases of one compression call.
///
/// The transition function is pure so the iteration bound is testable
/// without touching a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Walking the quality ladder; `step` counts decrements already applied.
    QualityReduce { step: u32 },
    /// The single dimension-shrink fallback.
    DimensionShrink,
    /// Terminal: the current artifact is the result.
    Done,
}

/// Advance the retry machine after one encode attempt.
fn next_phase(phase: Phase, over_budget: bool, max_steps: u32) -> Phase {
    match phase {
        Phase::QualityReduce { .. } if !over_budget => Phase::Done,
        Phase::QualityReduce { step } if step < max_steps => {
            Phase::QualityReduce { step: step + 1 }
        }
        Phase::QualityReduce { .. } => Phase::DimensionShrink,
        // The shrink is one-shot: whatever it produced is final
        Phase::DimensionShrink | Phase::Done => Phase::Done,
    }
}

/// Compute target dimensions preserving aspect ratio.
///
/// Only the long edge is clamped, in a single pass: landscape images are
/// bounded by `max_width`, everything else (portrait and square) by
/// `max_height`. Images already inside the bounds pass through untouched.
fn fit_dimensions(width: u32, height: u32, target: &CompressionTarget) -> (u32, u32) {
    if width > height {
        if width > target.max_width {
            let scale = target.max_width as f64 / width as f64;
            let fitted = (height as f64 * scale).round().max(1.0) as u32;
            return (target.max_width, fitted);
        }
    } else if height > target.max_height {
        let scale = target.max_height as f64 / height as f64;
        let fitted = (width as f64 * scale).round().max(1.0) as u32;
        return (fitted, target.max_height);
    }
    (width, height)
}

/// Compress a raw image payload to fit `target`.
///
/// Returns an artifact whose serialized length is at or below
/// `target.target_bytes` whenever the bounded retry policy can reach that,
/// and the best attempt otherwise. Decode and render failures are terminal;
/// no partial artifact is returned.
///
/// # Errors
///
/// * [`CompressError::Decode`] if `payload` is not a decodable image.
/// * [`CompressError::Render`] if a scaled raster or encode cannot be
///   produced.
pub fn compress<C: ImageCodec>(
    codec: &C,
    payload: &[u8],
    target: &CompressionTarget,
) -> Result<EncodedImage, CompressError> {
    let source = codec.decode(payload)?;

    let (mut width, mut height) = fit_dimensions(source.width, source.height, target);
    let scaled = codec.render_scaled(&source, width, height, FilterType::Lanczos3)?;

    let max_steps = target.max_quality_steps();
    let mut phase = Phase::QualityReduce { step: 0 };
    let mut quality = target.quality_at(0);
    let mut result = EncodedImage::jpeg(codec.encode(&scaled, quality)?, width, height);

    loop {
        let over_budget = result.serialized_len() > target.target_bytes;
        phase = next_phase(phase, over_budget, max_steps);

        match phase {
            Phase::QualityReduce { step } => {
                quality = target.quality_at(step);
                result = EncodedImage::jpeg(codec.encode(&scaled, quality)?, width, height);
            }
            Phase::DimensionShrink => {
                width = (width as f32 * target.shrink_factor).round() as u32;
                height = (height as f32 * target.shrink_factor).round() as u32;
                let shrunk = codec.render_scaled(&source, width, height, FilterType::Lanczos3)?;
                let bytes = codec.encode(&shrunk, quality)?;
                return Ok(EncodedImage::jpeg(bytes, width, height));
            }
            Phase::Done => return Ok(result),
        }
    }
}

/// Compress a payload already serialized as a data URL, returning the
/// artifact in the same form. This is the shape the file-reading boundary
/// hands over and the key-value store expects back.
///
/// # Errors
///
/// Same as [`compress`], plus [`CompressError::Decode`] for a malformed
/// data URL.
pub fn compress_data_url<C: ImageCodec>(
    codec: &C,
    payload: &str,
    target: &CompressionTarget,
) -> Result<String, CompressError> {
    let bytes = decode_data_url(payload)?;
    Ok(compress(codec, &bytes, target)?.to_data_url())
}
