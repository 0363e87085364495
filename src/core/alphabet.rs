//! Standard Base64 alphabet and its inverse lookup table.
//!
//! Both tables are computed at compile time. They are never written after
//! that, so any number of threads can read them without synchronization.

/// The 64 symbols of the standard alphabet: `A-Z`, `a-z`, `0-9`, `+`, `/`.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Padding character appended to a short final group.
pub const PAD: u8 = b'=';

/// Marker stored in [`DECODE_TABLE`] for bytes outside the alphabet.
pub const INVALID: u8 = 0xFF;

/// Maps every byte value to its 6-bit value, or [`INVALID`].
///
/// `=`, whitespace and all non-ASCII bytes are `INVALID`.
pub const DECODE_TABLE: [u8; 256] = build_decode_table();

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns the symbol for a 6-bit index.
///
/// Only the low six bits of `index` are used.
#[inline]
pub const fn symbol(index: u8) -> u8 {
    ALPHABET[(index & 0x3F) as usize]
}

/// Looks up the 6-bit value of an encoded byte.
#[inline]
pub const fn value(byte: u8) -> Option<u8> {
    match DECODE_TABLE[byte as usize] {
        INVALID => None,
        v => Some(v),
    }
}

/// Returns true if `byte` is one of the 64 alphabet symbols.
#[cfg(test)]
pub const fn is_symbol(byte: u8) -> bool {
    DECODE_TABLE[byte as usize] != INVALID
}
