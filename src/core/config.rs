use crate::data_uri::HeaderConvention;
use crate::encoders::algorithms::decode::{DecodeOptions, DecodePolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Directory name used under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "base64-image";
/// File name of the settings file, both built in and as override.
pub const CONFIG_FILE_NAME: &str = "converter.toml";

/// Settings for the data-URI encoder output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeSettings {
    /// Prepended to the file extension to build the media type
    pub media_type_prefix: String,
    /// Extension assumed when the input file has none
    pub fallback_extension: String,
}

/// Settings for decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeSettings {
    pub policy: DecodePolicy,
    /// Treat an empty decode result as a failure
    pub reject_empty: bool,
}

/// Settings for the corruption tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptSettings {
    /// Marker after which characters may be replaced
    pub marker: String,
    /// Number of replacements when none is given
    pub default_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSettings {
    /// Maximum input size in bytes (0 = unlimited)
    pub max_input_size: u64,
}

/// Complete converter configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub header: HeaderConvention,
    pub encode: EncodeSettings,
    pub decode: DecodeSettings,
    pub corrupt: CorruptSettings,
    pub limits: LimitSettings,
}

impl Settings {
    /// Parses a complete configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the built-in configuration.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::from_toml(DEFAULT_CONFIG)?)
    }

    /// Loads the built-in configuration with a single override file applied.
    ///
    /// The file may set any subset of keys.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut table = default_table()?;
        merge_tables(&mut table, read_table(path)?);
        Ok(into_settings(table)?)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in settings (from library)
    /// 2. `~/.config/base64-image/converter.toml` (user overrides)
    /// 3. `./converter.toml` (project-local overrides)
    /// 4. `extra`, if given (e.g. a `--config` argument)
    ///
    /// Later files override earlier ones key by key. A user or local file
    /// that fails to parse is skipped with a warning; an unreadable `extra`
    /// file is an error.
    pub fn load_with_overrides(extra: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut table = default_table()?;

        let mut candidates = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
        }
        candidates.push(Path::new(CONFIG_FILE_NAME).to_path_buf());

        for path in candidates.iter().filter(|p| p.exists()) {
            match read_table(path) {
                Ok(overrides) => {
                    log::debug!("applying config overrides from {:?}", path);
                    merge_tables(&mut table, overrides);
                }
                Err(e) => {
                    log::warn!("Failed to load config from {:?}: {}", path, e);
                }
            }
        }

        if let Some(path) = extra {
            merge_tables(&mut table, read_table(path)?);
        }

        Ok(into_settings(table)?)
    }

    /// Decode options derived from these settings.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            header: Some(self.header.clone()),
            policy: self.decode.policy,
        }
    }
}

const DEFAULT_CONFIG: &str = include_str!("../../converter.toml");

fn default_table() -> Result<toml::Table, toml::de::Error> {
    DEFAULT_CONFIG.parse()
}

fn into_settings(table: toml::Table) -> Result<Settings, toml::de::Error> {
    toml::Value::Table(table).try_into()
}

fn read_table(path: &Path) -> Result<toml::Table, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content.parse::<toml::Table>()?)
}

/// Recursively merges `overrides` into `base`. Tables merge key by key,
/// everything else is replaced.
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
