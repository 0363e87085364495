use clap::Args;
use std::path::PathBuf;

/// Global arguments that apply to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Suppress informational output and warnings
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log decoding and configuration details to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Maximum input size in bytes (0 = unlimited, default from config)
    #[arg(long, global = true)]
    pub max_size: Option<u64>,

    /// Process files exceeding the size limit
    #[arg(long, global = true)]
    pub force: bool,

    /// Extra config file applied after the standard locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
