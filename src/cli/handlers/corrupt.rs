use crate::cli::{args::CorruptArgs, commands::read_input, global::GlobalArgs};
use base64_image::{Settings, corrupt};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;

pub fn handle(
    args: CorruptArgs,
    global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut buffer = read_input(
        Some(&args.file),
        settings.limits.max_input_size,
        global.force,
    )?;

    let marker = args.marker.as_deref().unwrap_or(&settings.corrupt.marker);
    let count = args.count.unwrap_or(settings.corrupt.default_count);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let report = corrupt(&mut buffer, marker, count, &mut rng)?;

    let target = args.output.as_ref().unwrap_or(&args.file);
    fs::write(target, &buffer)?;

    if !global.quiet {
        println!(
            "Replaced {} character(s) after offset {} in {}",
            report.replaced(),
            report.payload_offset,
            target.display()
        );
    }
    Ok(())
}
