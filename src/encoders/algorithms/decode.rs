use crate::core::alphabet::{PAD, value};
use crate::data_uri::{HeaderConvention, split_header};
use serde::{Deserialize, Serialize};

pub use super::errors::CodecError;

/// What the decoder does with a quartet that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Drop the quartet and keep going. Only the final length shows that
    /// something was lost.
    #[default]
    Lenient,
    /// Fail with [`CodecError::MalformedQuartet`] on the first bad quartet.
    Strict,
}

/// Options controlling header extraction and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Header to skip before the Base64 text. `None` decodes the whole input.
    pub header: Option<HeaderConvention>,
    pub policy: DecodePolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            header: Some(HeaderConvention::DATA_URI),
            policy: DecodePolicy::Lenient,
        }
    }
}

impl DecodeOptions {
    /// Treat the entire input as Base64 text, with no header search.
    pub fn raw() -> Self {
        Self {
            header: None,
            policy: DecodePolicy::Lenient,
        }
    }

    pub fn with_header(mut self, header: Option<HeaderConvention>) -> Self {
        self.header = header;
        self
    }

    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Result of a decode: the recovered bytes plus bookkeeping.
///
/// `capacity()` is the size that was reserved up front from the nominal text
/// length. It is an upper bound only; consumers must use `len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    data: Vec<u8>,
    capacity: usize,
    quartets: usize,
    dropped: usize,
}

impl Decoded {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Number of bytes actually decoded.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes reserved before decoding started.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Quartets seen, including a trailing partial group.
    pub fn quartets(&self) -> usize {
        self.quartets
    }

    /// Quartets skipped because they failed validation.
    pub fn dropped_quartets(&self) -> usize {
        self.dropped
    }

    /// True when no quartet was dropped.
    pub fn is_complete(&self) -> bool {
        self.dropped == 0
    }
}

impl AsRef<[u8]> for Decoded {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Decoded> for Vec<u8> {
    fn from(decoded: Decoded) -> Self {
        decoded.data
    }
}

/// Decode with the default options: data-URI header skipped, lenient policy.
pub fn decode<T: AsRef<[u8]>>(text: T) -> Result<Decoded, CodecError> {
    decode_with(text, &DecodeOptions::default())
}

/// Decode with explicit options.
pub fn decode_with<T: AsRef<[u8]>>(
    text: T,
    options: &DecodeOptions,
) -> Result<Decoded, CodecError> {
    let input = text.as_ref();
    let (offset, body) = extract_body(input, options.header.as_ref());
    let capacity = decoded_capacity(body);

    let mut data = Vec::new();
    data.try_reserve_exact(capacity)
        .map_err(|_| CodecError::AllocationFailure {
            requested: capacity,
        })?;
    data.resize(capacity, 0);

    let stats = decode_quartets(body, offset, options.policy, &mut data)?;
    data.truncate(stats.written);

    Ok(Decoded {
        data,
        capacity,
        quartets: stats.quartets,
        dropped: stats.dropped,
    })
}

/// Decode into a caller-owned buffer, returning the number of bytes written.
///
/// The buffer must hold at least [`decoded_capacity`] of the extracted text.
pub fn decode_slice<T: AsRef<[u8]>>(
    text: T,
    output: &mut [u8],
    options: &DecodeOptions,
) -> Result<usize, CodecError> {
    let input = text.as_ref();
    let (offset, body) = extract_body(input, options.header.as_ref());
    let required = decoded_capacity(body);

    if output.len() < required {
        return Err(CodecError::BufferTooSmall {
            required,
            available: output.len(),
        });
    }

    let stats = decode_quartets(body, offset, options.policy, &mut output[..required])?;
    Ok(stats.written)
}

/// Upper bound on the decoded size of already-extracted Base64 text.
///
/// For quartet-aligned text this is `len * 3 / 4 - padding`. When the length
/// is not a multiple of four the padding is not subtracted, since trailing
/// `=` then sits in a partial group and the full quartets before it can still
/// produce three bytes each.
pub fn decoded_capacity(text: &[u8]) -> usize {
    let full = text.len() / 4 * 3;
    match text.len() % 4 {
        0 => full.saturating_sub(padding_count(text)),
        rem => full + (rem - 1),
    }
}

/// Trailing `=` characters, at most two.
pub fn padding_count(text: &[u8]) -> usize {
    text.iter().rev().take(2).take_while(|&&b| b == PAD).count()
}

/// Locates the Base64 body and returns it with its offset into `input`.
fn extract_body<'a>(input: &'a [u8], header: Option<&HeaderConvention>) -> (usize, &'a [u8]) {
    let start = header.map_or(0, |h| split_header(input, h));
    let body = &input[start..];

    let leading = body
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    let trimmed = body[leading..].trim_ascii_end();

    (start + leading, trimmed)
}

struct QuartetStats {
    written: usize,
    quartets: usize,
    dropped: usize,
}

/// Core loop. `output` is exactly `decoded_capacity(text)` long.
fn decode_quartets(
    text: &[u8],
    offset: usize,
    policy: DecodePolicy,
    output: &mut [u8],
) -> Result<QuartetStats, CodecError> {
    let mut j = 0;
    let mut dropped = 0;
    let mut quartets = 0;

    for (index, chunk) in text.chunks(4).enumerate() {
        quartets += 1;

        // A short final group is read as if padded out with '='
        let mut quartet = [PAD; 4];
        quartet[..chunk.len()].copy_from_slice(chunk);

        let decoded = if chunk.len() == 1 {
            None
        } else {
            decode_quartet(quartet)
        };

        match decoded {
            Some((bytes, n)) => {
                output[j..j + n].copy_from_slice(&bytes[..n]);
                j += n;
            }
            None => match policy {
                DecodePolicy::Lenient => dropped += 1,
                DecodePolicy::Strict => {
                    return Err(CodecError::malformed_quartet(offset + index * 4, chunk));
                }
            },
        }
    }

    if dropped > 0 {
        log::debug!(
            "dropped {} of {} quartets, recovered {} bytes",
            dropped,
            quartets,
            j
        );
    }

    Ok(QuartetStats {
        written: j,
        quartets,
        dropped,
    })
}

/// Validates one quartet and returns its bytes and how many of them count.
///
/// `=` in the third or fourth slot suppresses the matching output byte and
/// contributes zero bits to the other.
fn decode_quartet(q: [u8; 4]) -> Option<([u8; 3], usize)> {
    let c0 = value(q[0])?;
    let c1 = value(q[1])?;
    let c2 = if q[2] == PAD { 0 } else { value(q[2])? };
    let c3 = if q[3] == PAD { 0 } else { value(q[3])? };

    let mut bytes = [0u8; 3];
    let mut n = 0;

    bytes[n] = (c0 << 2) | (c1 >> 4);
    n += 1;
    if q[2] != PAD {
        bytes[n] = ((c1 & 0x0F) << 4) | (c2 >> 2);
        n += 1;
    }
    if q[3] != PAD {
        bytes[n] = ((c2 & 0x03) << 6) | c3;
        n += 1;
    }

    Some((bytes, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(text: &str) -> Vec<u8> {
        decode(text).unwrap().into_bytes()
    }

    #[test]
    fn test_decode_empty() {
        let decoded = decode("").unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.capacity(), 0);
        assert_eq!(decoded.quartets(), 0);
    }

    #[test]
    fn test_decode_man() {
        assert_eq!(lenient("TWFu"), [0x4D, 0x61, 0x6E]);
        assert_eq!(lenient("TWE="), [0x4D, 0x61]);
        assert_eq!(lenient("TQ=="), [0x4D]);
    }

    #[test]
    fn test_decode_rfc4648_vectors() {
        assert_eq!(lenient("Zg=="), b"f");
        assert_eq!(lenient("Zm8="), b"fo");
        assert_eq!(lenient("Zm9v"), b"foo");
        assert_eq!(lenient("Zm9vYg=="), b"foob");
        assert_eq!(lenient("Zm9vYmE="), b"fooba");
        assert_eq!(lenient("Zm9vYmFy"), b"foobar");
    }

    #[test]
    fn test_decode_skips_data_uri_header() {
        assert_eq!(lenient("data:image/png;base64,TWFu"), b"Man");
        assert_eq!(lenient("data:text/plain;base64,Zm9vYmFy"), b"foobar");
    }

    #[test]
    fn test_header_token_without_delimiter_decodes_everything() {
        // 'data' survives as a valid quartet, ':' breaks the next one
        let decoded = decode("data:TWFu").unwrap();
        assert_eq!(decoded.dropped_quartets(), 2);
        assert_eq!(decoded.len(), 3);
    }

    #[test]
    fn test_raw_options_do_not_search_for_header() {
        let decoded = decode_with("data:xx,TWFu", &DecodeOptions::raw()).unwrap();
        assert!(decoded.dropped_quartets() > 0);

        let decoded = decode_with("data:xx,TWFu", &DecodeOptions::default()).unwrap();
        assert_eq!(decoded.as_bytes(), b"Man");
    }

    #[test]
    fn test_decode_trims_surrounding_whitespace() {
        assert_eq!(lenient("  TWFu\r\n"), b"Man");
        assert_eq!(lenient("data:image/gif;base64,\nTQ==\n"), b"M");
    }

    #[test]
    fn test_malformed_quartet_is_dropped() {
        let decoded = decode("TWFu T== TWFu").unwrap();
        // "TWFu", " T==", " TWF", "u" -> only the first survives intact
        assert_eq!(decoded.dropped_quartets(), 3);
        assert_eq!(decoded.as_bytes(), b"Man");
    }

    #[test]
    fn test_malformed_quartet_does_not_corrupt_neighbours() {
        let decoded = decode("TWFuT W=TWFu").unwrap();
        assert_eq!(decoded.as_bytes(), b"ManMan");
        assert_eq!(decoded.dropped_quartets(), 1);
        assert!(!decoded.is_complete());
    }

    #[test]
    fn test_padding_in_first_slots_is_invalid() {
        let decoded = decode("====TWFu").unwrap();
        assert_eq!(decoded.as_bytes(), b"Man");
        assert_eq!(decoded.dropped_quartets(), 1);

        let decoded = decode("T===").unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_padding_in_third_slot_only() {
        // Third byte still computed with '=' contributing zero bits
        let decoded = decode("TW=u").unwrap();
        assert_eq!(decoded.as_bytes(), [0x4D, 0x2E]);
    }

    #[test]
    fn test_partial_trailing_group() {
        assert_eq!(lenient("TWFuTQ"), b"ManM");
        assert_eq!(lenient("TWFuTWE"), b"ManMa");

        let decoded = decode("TWFuT").unwrap();
        assert_eq!(decoded.as_bytes(), b"Man");
        assert_eq!(decoded.dropped_quartets(), 1);
    }

    #[test]
    fn test_capacity_formula() {
        assert_eq!(decoded_capacity(b"TWFu"), 3);
        assert_eq!(decoded_capacity(b"TWE="), 2);
        assert_eq!(decoded_capacity(b"TQ=="), 1);
        assert_eq!(decoded_capacity(b""), 0);
        assert_eq!(decoded_capacity(b"="), 0);
        assert_eq!(decoded_capacity(b"=="), 1);
        assert_eq!(decoded_capacity(b"TWFuTWFu"), 6);
    }

    #[test]
    fn test_capacity_never_undercounts_misaligned_padding() {
        // Nominal formula would give 15/4 - 1 = 2, but "TWFu" alone yields 3
        let decoded = decode("TWFu=").unwrap();
        assert_eq!(decoded.as_bytes(), b"Man");
        assert!(decoded.capacity() >= decoded.len());
    }

    #[test]
    fn test_reported_length_separate_from_capacity() {
        let decoded = decode("TWFu!!!!").unwrap();
        assert_eq!(decoded.capacity(), 6);
        assert_eq!(decoded.len(), 3);
    }

    #[test]
    fn test_padding_count() {
        assert_eq!(padding_count(b"TWFu"), 0);
        assert_eq!(padding_count(b"TWE="), 1);
        assert_eq!(padding_count(b"TQ=="), 2);
        assert_eq!(padding_count(b"T==="), 2);
        assert_eq!(padding_count(b""), 0);
    }

    #[test]
    fn test_strict_rejects_malformed_quartet() {
        let options = DecodeOptions::default().with_policy(DecodePolicy::Strict);
        let err = decode_with("TWFuT W=", &options).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedQuartet {
                position: 4,
                quartet: "T W=".to_string()
            }
        );
    }

    #[test]
    fn test_strict_position_includes_header_offset() {
        let options = DecodeOptions::default().with_policy(DecodePolicy::Strict);
        let err = decode_with("data:a;base64,TWFu*", &options).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedQuartet {
                position: 18,
                quartet: "*".to_string()
            }
        );
    }

    #[test]
    fn test_strict_accepts_valid_text() {
        let options = DecodeOptions::raw().with_policy(DecodePolicy::Strict);
        let decoded = decode_with("Zm9vYmE=", &options).unwrap();
        assert_eq!(decoded.as_bytes(), b"fooba");
    }

    #[test]
    fn test_decode_slice() {
        let mut buf = [0u8; 6];
        let n = decode_slice("data:,TWFuTQ==", &mut buf, &DecodeOptions::default()).unwrap();
        assert_eq!(&buf[..n], b"ManM");
    }

    #[test]
    fn test_decode_slice_too_small() {
        let mut buf = [0u8; 2];
        let err = decode_slice("TWFu", &mut buf, &DecodeOptions::raw()).unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferTooSmall {
                required: 3,
                available: 2
            }
        );
    }
}
