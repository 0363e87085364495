use std::fmt;

/// Errors reported by the codec.
///
/// Malformed quartets are not errors under the default lenient policy; they
/// only surface as [`CodecError::MalformedQuartet`] when decoding strictly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The working buffer could not be allocated. No partial output is valid.
    AllocationFailure { requested: usize },
    /// A caller-supplied output slice is too short.
    BufferTooSmall { required: usize, available: usize },
    /// A quartet failed validation under [`DecodePolicy::Strict`](super::decode::DecodePolicy::Strict).
    MalformedQuartet { position: usize, quartet: String },
}

impl CodecError {
    /// Create a MalformedQuartet error from the raw quartet bytes.
    pub fn malformed_quartet(position: usize, quartet: &[u8]) -> Self {
        CodecError::MalformedQuartet {
            position,
            quartet: quartet.escape_ascii().to_string(),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();
        let (error, hint) = if use_color {
            ("\x1b[1;31merror:\x1b[0m", "\x1b[1;36mhint:\x1b[0m")
        } else {
            ("error:", "hint:")
        };

        match self {
            CodecError::AllocationFailure { requested } => {
                write!(
                    f,
                    "{} could not allocate {} bytes for the output buffer",
                    error, requested
                )
            }
            CodecError::BufferTooSmall {
                required,
                available,
            } => {
                writeln!(f, "{} output buffer too small", error)?;
                writeln!(f)?;
                writeln!(f, "  need {} bytes, buffer holds {}", required, available)?;
                writeln!(f)?;
                write!(
                    f,
                    "{} size the buffer with encoded_len() or decoded_capacity()",
                    hint
                )
            }
            CodecError::MalformedQuartet { position, quartet } => {
                writeln!(
                    f,
                    "{} malformed quartet '{}' at position {}",
                    error, quartet, position
                )?;
                writeln!(f)?;
                write!(
                    f,
                    "{} decode leniently to skip invalid groups instead of failing",
                    hint
                )
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Errors raised by the file-level conversions and the corruption tool.
#[derive(Debug)]
pub enum ConvertError {
    /// Decoding produced no bytes, so there is nothing worth writing.
    EmptyPayload,
    /// The Base64 marker could not be found in the input.
    MarkerNotFound { marker: String },
    /// Input exceeds the configured size limit.
    InputTooLarge { size: u64, limit: u64 },
    /// Room to record the requested number of replacements could not be reserved.
    TooManyReplacements { requested: usize },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();
        let (error, hint) = if use_color {
            ("\x1b[1;31merror:\x1b[0m", "\x1b[1;36mhint:\x1b[0m")
        } else {
            ("error:", "hint:")
        };

        match self {
            ConvertError::EmptyPayload => {
                writeln!(f, "{} no bytes could be recovered from the input", error)?;
                write!(
                    f,
                    "\n{} check that the file holds Base64 text after the header",
                    hint
                )
            }
            ConvertError::MarkerNotFound { marker } => {
                write!(f, "{} no '{}' marker found in the input", error, marker)
            }
            ConvertError::InputTooLarge { size, limit } => {
                writeln!(
                    f,
                    "{} input is {} bytes, limit is {} bytes",
                    error, size, limit
                )?;
                write!(f, "\n{} pass --force to process it anyway", hint)
            }
            ConvertError::TooManyReplacements { requested } => {
                writeln!(
                    f,
                    "{} cannot track {} replacements in memory",
                    error, requested
                )?;
                write!(f, "\n{} lower --count or [corrupt] default_count", hint)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}
