//! Self-describing encoded-image artifacts.
//!
//! The site stores uploads as `data:` URLs in a small key-value store, so
//! the artifact's size accounting runs over the serialized string (format
//! tag plus base64 payload), not the raw codec bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::codec::CompressError;

/// MIME type of the lossy artifacts produced by the compressor.
pub const MIME_JPEG: &str = "image/jpeg";

const DATA_URL_SCHEME: &str = "data:";
const DATA_URL_SEPARATOR: &str = ";base64,";

/// A size-bounded, lossy-compressed image ready for storage.
///
/// Ownership transfers to the caller, who is responsible for persisting or
/// discarding it; the compressor never touches the store itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// MIME type of the encoded payload.
    pub mime: &'static str,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Final raster width in pixels.
    pub width: u32,
    /// Final raster height in pixels.
    pub height: u32,
}

impl EncodedImage {
    /// Wrap JPEG bytes produced by a codec.
    pub fn jpeg(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            mime: MIME_JPEG,
            bytes,
            width,
            height,
        }
    }

    /// Length of [`EncodedImage::to_data_url`]'s output, computed without
    /// building the string. Standard base64 emits four characters per three
    /// input bytes, padded.
    pub fn serialized_len(&self) -> usize {
        DATA_URL_SCHEME.len()
            + self.mime.len()
            + DATA_URL_SEPARATOR.len()
            + base64_len(self.bytes.len())
    }

    /// Serialize as `data:<mime>;base64,<payload>`.
    pub fn to_data_url(&self) -> String {
        format!(
            "{DATA_URL_SCHEME}{}{DATA_URL_SEPARATOR}{}",
            self.mime,
            STANDARD.encode(&self.bytes)
        )
    }
}

fn base64_len(bytes: usize) -> usize {
    bytes.div_ceil(3) * 4
}

/// Parse a `data:` URL payload back into raw bytes.
///
/// The input boundary hands the compressor file contents in this form (the
/// file reader serializes the picked file before the pipeline sees it).
///
/// # Errors
///
/// Returns [`CompressError::Decode`] if the payload is not a base64 data URL
/// or the base64 itself is malformed.
pub fn decode_data_url(payload: &str) -> Result<Vec<u8>, CompressError> {
    let b64 = match payload.split_once(DATA_URL_SEPARATOR) {
        Some((header, b64)) if header.starts_with(DATA_URL_SCHEME) => b64,
        _ => {
            return Err(CompressError::Decode(
                "payload is not a base64 data URL".to_string(),
            ))
        }
    };

    STANDARD
        .decode(b64)
        .map_err(|e| CompressError::Decode(format!("invalid base64 payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_shape() {
        let artifact = EncodedImage::jpeg(vec![0xFF, 0xD8, 0xFF, 0xD9], 1, 1);
        let url = artifact.to_data_url();

        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(url.len(), artifact.serialized_len());
    }

    #[test]
    fn test_serialized_len_padding() {
        // 0..=3 payload bytes cover every base64 padding case
        for n in 0..=3 {
            let artifact = EncodedImage::jpeg(vec![0xAB; n], 1, 1);
            assert_eq!(
                artifact.to_data_url().len(),
                artifact.serialized_len(),
                "mismatch for {n} payload bytes"
            );
        }
    }

    #[test]
    fn test_decode_data_url_roundtrip() {
        let bytes = vec![1u8, 2, 3, 4, 5];
        let artifact = EncodedImage::jpeg(bytes.clone(), 2, 2);
        let decoded = decode_data_url(&artifact.to_data_url()).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_decode_data_url_accepts_other_mimes() {
        let url = format!("data:image/png;base64,{}", STANDARD.encode([9u8, 8, 7]));
        assert_eq!(decode_data_url(&url).unwrap(), vec![9, 8, 7]);
    }

    #[test]
    fn test_decode_data_url_rejects_plain_strings() {
        let result = decode_data_url("not a data url");
        assert!(matches!(result, Err(CompressError::Decode(_))));
    }

    #[test]
    fn test_decode_data_url_rejects_missing_scheme() {
        let result = decode_data_url("image/jpeg;base64,AAAA");
        assert!(matches!(result, Err(CompressError::Decode(_))));
    }

    #[test]
    fn test_decode_data_url_rejects_bad_base64() {
        let result = decode_data_url("data:image/jpeg;base64,!!!not-base64!!!");
        assert!(matches!(result, Err(CompressError::Decode(_))));
    }
}
