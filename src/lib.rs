//! Standard Base64 codec with a lenient, data-URI aware decoder.
//!
//! Encoding is exact: `4 * ceil(n / 3)` characters, `=` padded, no line
//! breaks. Decoding skips an optional `data:<media-type>;base64,` header and,
//! by default, drops malformed quartets instead of failing, reporting how
//! many were lost alongside the recovered bytes.
//!
//! # Example
//!
//! ```
//! use base64_image::{decode, encode};
//!
//! let text = encode(b"Man").unwrap();
//! assert_eq!(text, "TWFu");
//!
//! let decoded = decode("data:image/png;base64,TWFu").unwrap();
//! assert_eq!(decoded.as_bytes(), b"Man");
//! ```

mod core;
mod encoders;

pub mod convenience;
pub mod corrupt;
pub mod data_uri;
pub mod prelude;

pub use crate::core::alphabet::{ALPHABET, DECODE_TABLE, INVALID, PAD};
pub use crate::core::config::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CorruptSettings, DecodeSettings, EncodeSettings,
    LimitSettings, Settings,
};
pub use corrupt::{CorruptionReport, corrupt};
pub use data_uri::{DataUri, HeaderConvention, media_type_for_path, split_header};
pub use encoders::decode::{
    DecodeOptions, DecodePolicy, Decoded, decode, decode_slice, decode_with, decoded_capacity,
    padding_count,
};
pub use encoders::encode::{encode, encode_slice, encoded_len};
pub use encoders::errors::{CodecError, ConvertError};
