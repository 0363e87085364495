use crate::core::alphabet::{PAD, symbol};

pub use super::errors::CodecError;

/// Exact length of the encoded form of `payload_len` bytes: `4 * ceil(n / 3)`.
///
/// Returns `None` if the result does not fit in `usize`.
pub fn encoded_len(payload_len: usize) -> Option<usize> {
    payload_len.div_ceil(3).checked_mul(4)
}

/// Encode bytes as padded standard Base64.
///
/// Fails only when the output buffer cannot be allocated.
pub fn encode(payload: &[u8]) -> Result<String, CodecError> {
    let len = encoded_len(payload.len()).ok_or(CodecError::AllocationFailure {
        requested: usize::MAX,
    })?;

    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| CodecError::AllocationFailure { requested: len })?;
    out.resize(len, 0);

    let written = encode_groups(payload, &mut out);
    debug_assert_eq!(written, len);

    Ok(out.into_iter().map(char::from).collect())
}

/// Encode into a caller-owned buffer, returning the number of bytes written.
pub fn encode_slice(payload: &[u8], output: &mut [u8]) -> Result<usize, CodecError> {
    let required = encoded_len(payload.len()).ok_or(CodecError::AllocationFailure {
        requested: usize::MAX,
    })?;

    if output.len() < required {
        return Err(CodecError::BufferTooSmall {
            required,
            available: output.len(),
        });
    }

    Ok(encode_groups(payload, &mut output[..required]))
}

/// Writes four symbols per input group. `output` must hold `encoded_len` bytes.
fn encode_groups(payload: &[u8], output: &mut [u8]) -> usize {
    let groups = payload.chunks_exact(3);
    let remainder = groups.remainder();
    let mut j = 0;

    for group in groups {
        let (b0, b1, b2) = (group[0], group[1], group[2]);
        output[j] = symbol(b0 >> 2);
        output[j + 1] = symbol(((b0 & 0x03) << 4) | (b1 >> 4));
        output[j + 2] = symbol(((b1 & 0x0F) << 2) | (b2 >> 6));
        output[j + 3] = symbol(b2 & 0x3F);
        j += 4;
    }

    // Missing bytes of the short group count as zero for the arithmetic only
    match *remainder {
        [b0] => {
            output[j] = symbol(b0 >> 2);
            output[j + 1] = symbol((b0 & 0x03) << 4);
            output[j + 2] = PAD;
            output[j + 3] = PAD;
            j += 4;
        }
        [b0, b1] => {
            output[j] = symbol(b0 >> 2);
            output[j + 1] = symbol(((b0 & 0x03) << 4) | (b1 >> 4));
            output[j + 2] = symbol((b1 & 0x0F) << 2);
            output[j + 3] = PAD;
            j += 4;
        }
        _ => {}
    }

    j
}
