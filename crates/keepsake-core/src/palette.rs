//! Dominant-color extraction for theming around uploaded photos.
//!
//! Samples a raster sparsely, counts exact colors, and returns the three
//! most frequent as CSS hex strings. Single pass over the sampled pixels;
//! memory is proportional to the number of distinct sampled colors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::codec::Raster;

/// Sample every 4th pixel; exact colors don't need full coverage.
const SAMPLE_STRIDE: usize = 4;

/// The three most frequent colors of a raster, as `#rrggbb` hex strings.
///
/// Serializes with the field names the site's theme layer expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub main_color: String,
    pub secondary_color: String,
    pub accent_color: String,
}

/// Extract a theme palette from a raster.
///
/// Returns `None` for an empty raster. When fewer than three distinct
/// colors are sampled, the dominant color pads the remaining slots.
///
/// Ties are broken by channel value so the result is deterministic across
/// runs, unlike hash-map iteration order.
pub fn extract_palette(raster: &Raster) -> Option<Palette> {
    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();

    for chunk in raster.pixels.chunks_exact(3).step_by(SAMPLE_STRIDE) {
        *counts.entry([chunk[0], chunk[1], chunk[2]]).or_insert(0) += 1;
    }

    if counts.is_empty() {
        return None;
    }

    let mut ranked: Vec<([u8; 3], u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let hex: Vec<String> = ranked.iter().take(3).map(|(rgb, _)| to_hex(*rgb)).collect();
    let main = hex[0].clone();

    Some(Palette {
        secondary_color: hex.get(1).cloned().unwrap_or_else(|| main.clone()),
        accent_color: hex.get(2).cloned().unwrap_or_else(|| main.clone()),
        main_color: main,
    })
}

fn to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}
