mod args;
mod commands;
mod config;
mod global;
mod handlers;

use args::{ConfigAction, CorruptArgs, DecodeArgs, EncodeArgs};
use clap::{Parser, Subcommand};
use global::GlobalArgs;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "base64-image")]
#[command(version)]
#[command(about = "Convert images and other binary files to data-URI Base64 text and back", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file as Base64 wrapped in a data-URI header
    Encode(EncodeArgs),

    /// Decode Base64 text, with or without a data-URI header
    Decode(DecodeArgs),

    /// Overwrite random payload characters to test recovery
    Corrupt(CorruptArgs),

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sets up env_logger. `RUST_LOG` overrides the level chosen by flags.
fn init_logging(global: &GlobalArgs) {
    let level = if global.quiet {
        LevelFilter::Error
    } else if global.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let settings = config::load_settings(&cli.global)?;

    match cli.command {
        Commands::Encode(args) => handlers::encode::handle(args, &cli.global, &settings),
        Commands::Decode(args) => handlers::decode::handle(args, &cli.global, &settings),
        Commands::Corrupt(args) => handlers::corrupt::handle(args, &cli.global, &settings),
        Commands::Config { action } => handlers::config::handle(action, &cli.global, &settings),
    }
}
