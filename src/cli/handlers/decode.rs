use crate::cli::{
    args::DecodeArgs,
    commands::{read_input, write_output},
    global::GlobalArgs,
};
use base64_image::{
    DecodePolicy, Settings,
    convenience::{decode_file, decode_text},
};

pub fn handle(
    args: DecodeArgs,
    global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = settings.decode_options();
    if let Some(policy) = args.policy {
        options.policy = policy.into();
    }
    if args.strict {
        options.policy = DecodePolicy::Strict;
    }
    if args.no_header {
        options.header = None;
    }

    let mut settings = settings.clone();
    if args.allow_empty {
        settings.decode.reject_empty = false;
    }

    let decoded = match &args.file {
        Some(path) => decode_file(path, &options, &settings, global.force)?,
        None => {
            let text = read_input(None, settings.limits.max_input_size, global.force)?;
            decode_text(&text, &options, settings.decode.reject_empty)?
        }
    };

    log::info!(
        "decoded {} bytes ({} reserved, {} quartet(s) dropped)",
        decoded.len(),
        decoded.capacity(),
        decoded.dropped_quartets()
    );

    write_output(args.output.as_deref(), decoded.as_bytes())
}
