use base64_image::DecodePolicy;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Arguments for encoding a file
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Media type for the data-URI header (default: derived from the file extension)
    #[arg(short = 'm', long, value_name = "TYPE")]
    pub media_type: Option<String>,

    /// Write bare Base64 without the data-URI header
    #[arg(short = 'r', long, conflicts_with = "media_type")]
    pub raw: bool,
}

/// Arguments for decoding Base64 text
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// How to treat malformed quartets (default from config)
    #[arg(long, value_enum)]
    pub policy: Option<PolicyCli>,

    /// Shorthand for --policy strict
    #[arg(long, conflicts_with = "policy")]
    pub strict: bool,

    /// Decode the whole input, without looking for a header
    #[arg(long)]
    pub no_header: bool,

    /// Write the result even if nothing could be decoded
    #[arg(long)]
    pub allow_empty: bool,
}

/// Arguments for corrupting a Base64 file
#[derive(Args, Debug)]
pub struct CorruptArgs {
    /// File holding Base64 text after a marker
    pub file: PathBuf,

    /// Number of characters to replace (default from config)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Marker after which characters may be replaced (default from config)
    #[arg(long)]
    pub marker: Option<String>,

    /// Seed for reproducible damage
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the damaged text here instead of modifying FILE in place
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Decode policy (CLI enum)
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyCli {
    Lenient,
    Strict,
}

impl From<PolicyCli> for DecodePolicy {
    fn from(cli: PolicyCli) -> Self {
        match cli {
            PolicyCli::Lenient => DecodePolicy::Lenient,
            PolicyCli::Strict => DecodePolicy::Strict,
        }
    }
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the override files that are searched
    Paths,
}
