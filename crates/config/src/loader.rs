//! Configuration loader implementation

use crate::schema::{RawConfig, CONFIG_NAME};
use anyhow::{Context, Result as AnyResult};
use async_trait::async_trait;
use figment::{
    providers::{Format, Json, Toml, Yaml},
    Figment,
};
use serde_json::Value;
use std::path::Path;
use tracing::debug;
use types::{ConfigError, Result};

/// Extensions probed for a named config file, in order of precedence
const CONFIG_EXTENSIONS: [&str; 6] = ["json", "jsonc", "json5", "yaml", "yml", "toml"];

/// Trait for sources of named configuration objects
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Load the configuration object called `name` from `dir`.
    ///
    /// Returns `Ok(None)` when there is no such file or it holds no keys.
    async fn load_named_config(&self, name: &str, dir: &Path) -> Result<Option<Value>>;
}

/// Reads `<name>.{json,jsonc,json5,yaml,yml,toml}` from disk
#[derive(Debug, Clone, Default)]
pub struct FileConfigSource;

impl FileConfigSource {
    /// Create a new file source
    pub fn new() -> Self {
        Self
    }

    /// Parse file content into a JSON object, treating empty content as absent
    fn parse(extension: &str, content: &str) -> std::result::Result<Option<Value>, ConfigError> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = match extension {
            // Comments and trailing commas
            "jsonc" | "json5" => json5::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?,
            _ => {
                let figment = match extension {
                    "json" => Figment::from(Json::string(content)),
                    "toml" => Figment::from(Toml::string(content)),
                    _ => Figment::from(Yaml::string(content)),
                };
                figment
                    .extract()
                    .map_err(|e| ConfigError::ParseError(e.to_string()))?
            }
        };

        Ok(match value {
            Value::Null => None,
            Value::Object(map) if map.is_empty() => None,
            other => Some(other),
        })
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn load_named_config(&self, name: &str, dir: &Path) -> Result<Option<Value>> {
        for extension in CONFIG_EXTENSIONS {
            let path = dir.join(format!("{name}.{extension}"));
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(ConfigError::ReadFailed {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    }
                    .in_dir(dir))
                }
            };

            debug!(path = %path.display(), "Found configuration file");
            return Self::parse(extension, &content).map_err(|e| {
                let message = match e {
                    ConfigError::ParseError(message) => message,
                    other => other.to_string(),
                };
                ConfigError::ParseFailed {
                    file: format!("{name}.{extension}"),
                    message,
                }
                .in_dir(dir)
            });
        }

        debug!(name, dir = %dir.display(), "No configuration file found");
        Ok(None)
    }
}

/// Helpers for producing and checking `components.json` files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Validate a configuration object against the strict schema
    pub fn validate_value(value: Value) -> std::result::Result<RawConfig, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::SchemaViolation(e.to_string()))
    }

    /// Load configuration from a JSON string (for testing)
    pub fn load_from_str(json_content: &str) -> AnyResult<RawConfig> {
        let value = FileConfigSource::parse("json", json_content)
            .context("Failed to parse configuration from string")?
            .context("Configuration is empty")?;
        Ok(Self::validate_value(value)?)
    }

    /// Get default configuration
    pub fn default() -> RawConfig {
        RawConfig::default()
    }

    /// Write `config` to `<dir>/components.json`, refusing to clobber unless `force`
    pub fn create_example<P: AsRef<Path>>(dir: P, config: &RawConfig, force: bool) -> AnyResult<()> {
        let path = dir.as_ref().join(format!("{CONFIG_NAME}.json"));
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.display().to_string(),
            }
            .into());
        }

        let mut json_content = serde_json::to_string_pretty(config)
            .context("Failed to serialize configuration")?;
        json_content.push('\n');

        std::fs::write(&path, json_content).context("Failed to write configuration file")?;

        Ok(())
    }
}
