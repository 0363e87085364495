//! Data-URI framing around Base64 payloads.
//!
//! Encoded files are written as `data:<media-type>;base64,<payload>`. The
//! decoder only needs to know where the payload starts, which is described by
//! a [`HeaderConvention`]: a token that marks the header and the delimiter
//! that ends it.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// How to recognize a header in front of Base64 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderConvention {
    /// Token whose presence marks a header, e.g. `data:`.
    pub token: Cow<'static, str>,
    /// Character ending the header. Decoding starts right after it.
    pub delimiter: char,
}

impl HeaderConvention {
    /// `data:<media-type>;base64,` style headers.
    pub const DATA_URI: HeaderConvention = HeaderConvention {
        token: Cow::Borrowed("data:"),
        delimiter: ',',
    };

    pub fn new(token: impl Into<Cow<'static, str>>, delimiter: char) -> Self {
        Self {
            token: token.into(),
            delimiter,
        }
    }
}

impl Default for HeaderConvention {
    fn default() -> Self {
        Self::DATA_URI
    }
}

/// Returns the offset where Base64 text begins.
///
/// If `token` occurs in `input`, the text starts after the first `delimiter`
/// at or after it. Otherwise, or if no delimiter follows, the offset is 0.
pub fn split_header(input: &[u8], convention: &HeaderConvention) -> usize {
    let token = convention.token.as_bytes();
    let mut delim = [0u8; 4];
    let delim = convention.delimiter.encode_utf8(&mut delim).as_bytes();

    find(input, token)
        .and_then(|at| find(&input[at..], delim).map(|d| at + d + delim.len()))
        .unwrap_or(0)
}

pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Derives an image media type from a file's extension.
///
/// The extension is used as written, lower-cased: `photo.PNG` becomes
/// `image/png`, `photo.jpg` stays `image/jpg`. Files without an extension get
/// `fallback_ext`.
pub fn media_type_for_path(path: &Path, prefix: &str, fallback_ext: &str) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| fallback_ext.to_string());
    format!("{}{}", prefix, ext)
}

/// A Base64 payload together with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri<'a> {
    media_type: Cow<'a, str>,
    payload: Cow<'a, str>,
}

impl<'a> DataUri<'a> {
    pub fn new(media_type: impl Into<Cow<'a, str>>, payload: impl Into<Cow<'a, str>>) -> Self {
        Self {
            media_type: media_type.into(),
            payload: payload.into(),
        }
    }

    /// Splits `data:<media-type>;base64,<payload>`.
    ///
    /// Returns `None` unless the text starts with `data:` and declares
    /// base64 encoding before the comma.
    pub fn parse(text: &'a str) -> Option<Self> {
        let rest = text.trim_start().strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let media_type = meta.strip_suffix(";base64")?;
        Some(Self {
            media_type: Cow::Borrowed(media_type),
            payload: Cow::Borrowed(payload.trim()),
        })
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The `data:<media-type>;base64,` prefix.
    pub fn header(&self) -> String {
        format!("data:{};base64,", self.media_type)
    }
}

impl fmt::Display for DataUri<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.media_type, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_header_data_uri() {
        let input = b"data:image/png;base64,TWFu";
        assert_eq!(split_header(input, &HeaderConvention::DATA_URI), 22);
    }

    #[test]
    fn test_split_header_without_token() {
        assert_eq!(split_header(b"TWFu,TWFu", &HeaderConvention::DATA_URI), 0);
    }

    #[test]
    fn test_split_header_token_without_delimiter() {
        assert_eq!(split_header(b"data:TWFu", &HeaderConvention::DATA_URI), 0);
    }

    #[test]
    fn test_split_header_ignores_delimiter_before_token() {
        let input = b"x,y data:image/gif;base64,R0lG";
        assert_eq!(split_header(input, &HeaderConvention::DATA_URI), 26);
    }

    #[test]
    fn test_split_header_custom_convention() {
        let convention = HeaderConvention::new("image/", ';');
        assert_eq!(split_header(b"data:image/png;TWFu", &convention), 15);
    }

    #[test]
    fn test_media_type_for_path() {
        let prefix = "image/";
        assert_eq!(
            media_type_for_path(Path::new("cat.png"), prefix, "jpg"),
            "image/png"
        );
        assert_eq!(
            media_type_for_path(Path::new("dir.v2/Cat.GIF"), prefix, "jpg"),
            "image/gif"
        );
        assert_eq!(
            media_type_for_path(Path::new("noext"), prefix, "jpg"),
            "image/jpg"
        );
    }

    #[test]
    fn test_data_uri_display() {
        let uri = DataUri::new("image/png", "TWFu");
        assert_eq!(uri.to_string(), "data:image/png;base64,TWFu");
        assert_eq!(uri.header(), "data:image/png;base64,");
    }

    #[test]
    fn test_data_uri_parse() {
        let uri = DataUri::parse("data:image/bmp;base64,Qk0=\n").unwrap();
        assert_eq!(uri.media_type(), "image/bmp");
        assert_eq!(uri.payload(), "Qk0=");

        assert!(DataUri::parse("data:text/plain,hello").is_none());
        assert!(DataUri::parse("TWFu").is_none());
    }
}
