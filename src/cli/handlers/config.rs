use crate::cli::{args::ConfigAction, config::override_paths, global::GlobalArgs};
use base64_image::Settings;

pub fn handle(
    action: ConfigAction,
    _global: &GlobalArgs,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show { json } => handle_show(json, settings),
        ConfigAction::Paths => handle_paths(),
    }
}

fn handle_show(json: bool, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(settings)?);
    } else {
        print!("{}", toml::to_string(settings)?);
    }
    Ok(())
}

fn handle_paths() -> Result<(), Box<dyn std::error::Error>> {
    for path in override_paths() {
        let status = if path.exists() { "found" } else { "missing" };
        println!("{:<8} {}", status, path.display());
    }
    Ok(())
}
