use crate::error::ConfigError;
use crate::types::DEFAULT_PCM_MIME_TYPE;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AudioConfig {
    /// Used when no record of the stream carries a MIME type.
    #[serde(default = "default_mime_type")]
    pub default_mime_type: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            default_mime_type: default_mime_type(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_plugin")]
    pub plugin: String,

    /// Plugin-specific keys, passed to the destination untouched.
    #[serde(flatten)]
    pub extra: toml::Value,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            plugin: default_storage_plugin(),
            extra: toml::Value::Table(Default::default()),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_mime_type() -> String {
    DEFAULT_PCM_MIME_TYPE.to_string()
}

fn default_storage_plugin() -> String {
    "file".to_string()
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => return Err(ConfigError::EnvVarNotFound(var_name.to_string())),
        }
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        tracing::debug!(
            storage = %config.storage.plugin,
            default_mime = %config.audio.default_mime_type,
            "configuration parsed"
        );
        Ok(config)
    }
}
