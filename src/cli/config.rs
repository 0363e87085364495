use crate::cli::global::GlobalArgs;
use base64_image::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, Settings};
use std::path::PathBuf;

/// Expands `~` in a user-supplied config path and checks that it exists.
fn resolve_config_path(path: &std::path::Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let raw = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(&raw).as_ref());

    if !expanded.is_file() {
        return Err(format!("Config file '{}' does not exist", raw).into());
    }

    Ok(expanded)
}

/// Loads settings from all locations and applies CLI overrides.
pub fn load_settings(global: &GlobalArgs) -> Result<Settings, Box<dyn std::error::Error>> {
    let extra = global
        .config
        .as_deref()
        .map(resolve_config_path)
        .transpose()?;

    let mut settings = Settings::load_with_overrides(extra.as_deref())?;

    if let Some(max_size) = global.max_size {
        settings.limits.max_input_size = max_size;
    }

    Ok(settings)
}

/// Override files in the order they are applied.
pub fn override_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}
