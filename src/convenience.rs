//! File-level conversions: binary file to data-URI text and back.
//!
//! These wrap the codec with the I/O and checks a front end needs: size
//! limits, header framing, and rejecting decodes that recovered nothing.

use crate::core::config::Settings;
use crate::data_uri::{DataUri, media_type_for_path};
use crate::encoders::algorithms::decode::{DecodeOptions, Decoded, decode_with};
use crate::encoders::algorithms::encode::encode;
use crate::encoders::algorithms::errors::ConvertError;
use std::path::Path;

/// Result of encoding a file.
#[derive(Debug, Clone)]
pub struct EncodeFileResult {
    /// Full data-URI text, header included
    pub text: String,
    /// Media type written in the header
    pub media_type: String,
    /// Size of the input file in bytes
    pub input_len: usize,
}

/// Checks `size` against `limit` (0 = unlimited).
///
/// With `force`, an oversized input only logs a warning.
pub fn check_size(size: u64, limit: u64, force: bool) -> Result<(), ConvertError> {
    if limit == 0 || size <= limit {
        return Ok(());
    }
    if force {
        log::warn!(
            "Processing large input ({} bytes, limit: {} bytes)",
            size,
            limit
        );
        return Ok(());
    }
    Err(ConvertError::InputTooLarge { size, limit })
}

/// Encode raw bytes and wrap them in a data-URI header.
pub fn encode_to_data_uri(
    payload: &[u8],
    media_type: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let encoded = encode(payload)?;
    Ok(DataUri::new(media_type, encoded).to_string())
}

/// Reads a file and encodes it as a data URI.
///
/// The media type comes from the file extension unless `media_type` is given.
pub fn encode_file(
    input: &Path,
    media_type: Option<&str>,
    settings: &Settings,
    force: bool,
) -> Result<EncodeFileResult, Box<dyn std::error::Error>> {
    let size = std::fs::metadata(input)?.len();
    check_size(size, settings.limits.max_input_size, force)?;

    let payload = std::fs::read(input)?;
    let media_type = match media_type {
        Some(m) => m.to_string(),
        None => media_type_for_path(
            input,
            &settings.encode.media_type_prefix,
            &settings.encode.fallback_extension,
        ),
    };

    let text = encode_to_data_uri(&payload, &media_type)?;
    log::info!(
        "encoded {} bytes from {:?} as {}",
        payload.len(),
        input,
        media_type
    );

    Ok(EncodeFileResult {
        text,
        media_type,
        input_len: payload.len(),
    })
}

/// Decodes text that may carry a header, applying the empty-result check.
pub fn decode_text(
    text: &[u8],
    options: &DecodeOptions,
    reject_empty: bool,
) -> Result<Decoded, Box<dyn std::error::Error>> {
    let decoded = decode_with(text, options)?;

    if !decoded.is_complete() {
        log::warn!(
            "skipped {} malformed quartet(s) of {}; output may be damaged",
            decoded.dropped_quartets(),
            decoded.quartets()
        );
    }
    if reject_empty && decoded.is_empty() {
        return Err(ConvertError::EmptyPayload.into());
    }

    Ok(decoded)
}

/// Reads a text file holding Base64 (optionally data-URI wrapped) and decodes it.
pub fn decode_file(
    input: &Path,
    options: &DecodeOptions,
    settings: &Settings,
    force: bool,
) -> Result<Decoded, Box<dyn std::error::Error>> {
    let size = std::fs::metadata(input)?.len();
    check_size(size, settings.limits.max_input_size, force)?;

    let text = std::fs::read(input)?;
    let decoded = decode_text(&text, options, settings.decode.reject_empty)?;
    log::info!("decoded {} bytes from {:?}", decoded.len(), input);
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::algorithms::decode::DecodePolicy;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("base64-image-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(10, 0, false).is_ok());
        assert!(check_size(10, 10, false).is_ok());
        assert!(check_size(11, 10, true).is_ok());
        assert!(matches!(
            check_size(11, 10, false),
            Err(ConvertError::InputTooLarge { size: 11, limit: 10 })
        ));
    }

    #[test]
    fn test_encode_to_data_uri() {
        let text = encode_to_data_uri(b"Man", "image/png").unwrap();
        assert_eq!(text, "data:image/png;base64,TWFu");
    }

    #[test]
    fn test_file_roundtrip() {
        let settings = Settings::load_default().unwrap();
        let image = temp_path("pixel.gif");
        let text_file = temp_path("pixel.txt");
        let payload: Vec<u8> = (0..=255u8).chain(0..17).collect();
        std::fs::write(&image, &payload).unwrap();

        let encoded = encode_file(&image, None, &settings, false).unwrap();
        assert_eq!(encoded.media_type, "image/gif");
        assert!(encoded.text.starts_with("data:image/gif;base64,"));
        assert_eq!(encoded.input_len, payload.len());

        std::fs::write(&text_file, &encoded.text).unwrap();
        let decoded = decode_file(&text_file, &settings.decode_options(), &settings, false).unwrap();

        std::fs::remove_file(&image).ok();
        std::fs::remove_file(&text_file).ok();

        assert_eq!(decoded.as_bytes(), &payload[..]);
        assert!(decoded.is_complete());
    }

    #[test]
    fn test_encode_file_media_type_override() {
        let mut settings = Settings::load_default().unwrap();
        settings.limits.max_input_size = 0;
        let input = temp_path("blob");
        std::fs::write(&input, b"Ma").unwrap();

        let result = encode_file(&input, Some("application/octet-stream"), &settings, false);
        std::fs::remove_file(&input).ok();

        assert_eq!(
            result.unwrap().text,
            "data:application/octet-stream;base64,TWE="
        );
    }

    #[test]
    fn test_encode_file_respects_limit() {
        let mut settings = Settings::load_default().unwrap();
        settings.limits.max_input_size = 2;
        let input = temp_path("big.png");
        std::fs::write(&input, b"abcdef").unwrap();

        let refused = encode_file(&input, None, &settings, false);
        let forced = encode_file(&input, None, &settings, true);
        std::fs::remove_file(&input).ok();

        assert!(refused.is_err());
        assert_eq!(forced.unwrap().text, "data:image/png;base64,YWJjZGVm");
    }

    #[test]
    fn test_decode_text_rejects_empty() {
        let options = DecodeOptions::default();
        assert!(decode_text(b"data:image/png;base64,", &options, true).is_err());
        assert!(decode_text(b"data:image/png;base64,", &options, false).unwrap().is_empty());
        assert!(decode_text(b"!!!!", &options, true).is_err());
    }

    #[test]
    fn test_decode_text_strict_propagates_error() {
        let options = DecodeOptions::default().with_policy(DecodePolicy::Strict);
        assert!(decode_text(b"TWFu!!!!", &options, true).is_err());
        assert_eq!(
            decode_text(b"TWFu", &options, true).unwrap().as_bytes(),
            b"Man"
        );
    }
}
