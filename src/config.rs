use crate::hasher::DEFAULT_READ_BUFFER_SIZE;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_PATH: &str = "reference.patch";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the patch report is written.
    pub output_path: String,
    /// Glob patterns matched against relative paths; matches are not scanned.
    pub ignore_patterns: Vec<String>,
    /// Bytes read per chunk while hashing.
    pub read_buffer_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            ignore_patterns: Vec::new(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl AppConfig {
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Defaults, then `Config.*` in the working directory (optional), then
/// `DIRPATCH_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    load_from("Config")
}

pub fn load_from(file_stem: &str) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();

    let builder = Config::builder()
        .set_default("output_path", defaults.output_path)?
        .set_default("ignore_patterns", defaults.ignore_patterns)?
        .set_default("read_buffer_size", defaults.read_buffer_size as u64)?
        .add_source(ConfigFile::with_name(file_stem).required(false))
        .add_source(
            Environment::with_prefix("DIRPATCH")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ignore_patterns"),
        )
        .build()?;

    builder.try_deserialize::<AppConfig>()
}
