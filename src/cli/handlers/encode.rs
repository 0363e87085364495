use crate::cli::{
    args::EncodeArgs,
    commands::{read_input, write_output},
    global::GlobalArgs,
};
use base64_image::{
    Settings,
    convenience::{encode_file, encode_to_data_uri},
    encode,
};

pub fn handle(
    args: EncodeArgs,
    global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut text, input_len) = match &args.file {
        Some(path) if !args.raw => {
            let result = encode_file(path, args.media_type.as_deref(), settings, global.force)?;
            log::debug!("using media type {}", result.media_type);
            (result.text, result.input_len)
        }
        file => {
            let data = read_input(file.as_ref(), settings.limits.max_input_size, global.force)?;
            let text = if args.raw {
                encode(&data)?
            } else {
                let media_type = args.media_type.clone().unwrap_or_else(|| {
                    format!(
                        "{}{}",
                        settings.encode.media_type_prefix, settings.encode.fallback_extension
                    )
                });
                log::debug!("using media type {}", media_type);
                encode_to_data_uri(&data, &media_type)?
            };
            (text, data.len())
        }
    };

    log::info!("encoded {} bytes into {} characters", input_len, text.len());

    // Files get the text exactly; the terminal gets a trailing newline
    if args.output.is_none() {
        text.push('\n');
    }
    write_output(args.output.as_deref(), text.as_bytes())
}
