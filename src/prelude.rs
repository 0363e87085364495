//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use base64_image::prelude::*;
//!
//! let settings = Settings::load_default().unwrap();
//! let decoded = decode_with("data:image/png;base64,TQ==", &settings.decode_options()).unwrap();
//! assert_eq!(decoded.as_bytes(), b"M");
//! ```

pub use crate::{
    // Errors
    CodecError,
    ConvertError,
    // Data URI framing
    DataUri,
    // Core encoding/decoding
    DecodeOptions,
    DecodePolicy,
    Decoded,
    HeaderConvention,
    // Config
    Settings,
    // File-level conversions
    convenience::{EncodeFileResult, decode_file, encode_file, encode_to_data_uri},
    decode,
    decode_with,
    encode,
};
