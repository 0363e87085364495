//! Random damage for Base64 payloads.
//!
//! Overwrites characters after a marker with random alphabet symbols. Useful
//! for checking how much of a file the lenient decoder can still recover.

use crate::core::alphabet::ALPHABET;
use crate::data_uri::find;
use crate::encoders::algorithms::errors::ConvertError;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Where the payload started and which offsets were overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptionReport {
    /// Offset of the first byte after the marker.
    pub payload_offset: usize,
    /// Overwritten offsets in the order they were chosen. May repeat.
    pub positions: Vec<usize>,
}

impl CorruptionReport {
    pub fn replaced(&self) -> usize {
        self.positions.len()
    }
}

/// Replaces `count` random payload characters with random alphabet symbols.
///
/// The payload is everything after the first occurrence of `marker`.
/// Positions are drawn independently, so the same offset can be hit twice.
pub fn corrupt<R: Rng + ?Sized>(
    buffer: &mut [u8],
    marker: &str,
    count: usize,
    rng: &mut R,
) -> Result<CorruptionReport, ConvertError> {
    let payload_offset = find(buffer, marker.as_bytes())
        .map(|at| at + marker.len())
        .ok_or_else(|| ConvertError::MarkerNotFound {
            marker: marker.to_string(),
        })?;

    if payload_offset >= buffer.len() {
        return Err(ConvertError::EmptyPayload);
    }

    let mut positions = Vec::new();
    positions
        .try_reserve_exact(count)
        .map_err(|_| ConvertError::TooManyReplacements { requested: count })?;
    for _ in 0..count {
        let at = rng.random_range(payload_offset..buffer.len());
        if let Some(&symbol) = ALPHABET.choose(rng) {
            buffer[at] = symbol;
        }
        positions.push(at);
    }

    log::debug!(
        "replaced {} characters after offset {}",
        positions.len(),
        payload_offset
    );

    Ok(CorruptionReport {
        payload_offset,
        positions,
    })
}
