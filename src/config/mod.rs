//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/histoury/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for requests
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// External provider settings
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Local classifier artifacts
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default search radius in meters
    #[serde(default = "default_radius")]
    pub radius: u32,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Default summary language
    #[serde(default = "default_language")]
    pub language: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Where narration MP3s are written and served from
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
}

/// External provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Upper bound for each provider call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Chat model used for summaries
    #[serde(default = "default_summary_model")]
    pub summary_model: String,
}

/// Local classifier artifacts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Centroid model JSON; empty disables the local strategy
    #[serde(default)]
    pub model_path: String,

    /// Landmark table TOML; empty uses the built-in table
    #[serde(default)]
    pub landmarks_path: String,
}

/// API keys for external services
///
/// Empty values fall back to environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Google Cloud Vision
    #[serde(default)]
    pub vision: String,

    /// Google Places
    #[serde(default)]
    pub places: String,

    /// OpenAI
    #[serde(default)]
    pub openai: String,
}

// Default value functions for serde
fn default_radius() -> u32 {
    DEFAULT_RADIUS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_audio_dir() -> String {
    DEFAULT_AUDIO_DIR.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_summary_model() -> String {
    DEFAULT_SUMMARY_MODEL.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            format: default_format(),
            language: default_language(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            audio_dir: default_audio_dir(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            summary_model: default_summary_model(),
        }
    }
}

/// Configured value, or the environment variable when it is blank
fn key_or_env(value: &str, var: &str) -> Option<String> {
    let value = value.trim();
    if !value.is_empty() {
        return Some(value.to_string());
    }
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Non-empty path setting
fn non_empty_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "radius"] => Some(self.defaults.radius.to_string()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),
            ["defaults", "language"] => Some(self.defaults.language.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),
            ["server", "audio_dir"] => Some(self.server.audio_dir.clone()),

            ["providers", "timeout_secs"] => Some(self.providers.timeout_secs.to_string()),
            ["providers", "summary_model"] => Some(self.providers.summary_model.clone()),

            ["classifier", "model_path"] => Some(self.classifier.model_path.clone()),
            ["classifier", "landmarks_path"] => Some(self.classifier.landmarks_path.clone()),

            ["api_keys", "vision"] => Some(self.api_keys.vision.clone()),
            ["api_keys", "places"] => Some(self.api_keys.places.clone()),
            ["api_keys", "openai"] => Some(self.api_keys.openai.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "radius"] => {
                let radius = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid radius value: {}", value))
                })?;
                self.defaults.radius = crate::places::validate_radius(radius)
                    .map_err(|e| Error::Config(e.to_string()))?;
            }
            ["defaults", "format"] => {
                if crate::format::get_formatter(value).is_none() {
                    return Err(Error::Config(format!("Unknown format: {}", value)));
                }
                self.defaults.format = value.to_lowercase();
            }
            ["defaults", "language"] => {
                crate::summary::validate_language(value)
                    .map_err(|e| Error::Config(e.to_string()))?;
                self.defaults.language = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }
            ["server", "audio_dir"] => {
                self.server.audio_dir = value.to_string();
            }

            ["providers", "timeout_secs"] => {
                let secs: u64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
                if secs == 0 {
                    return Err(Error::Config("Timeout must be at least 1 second".to_string()));
                }
                self.providers.timeout_secs = secs;
            }
            ["providers", "summary_model"] => {
                self.providers.summary_model = value.to_string();
            }

            ["classifier", "model_path"] => {
                self.classifier.model_path = value.to_string();
            }
            ["classifier", "landmarks_path"] => {
                self.classifier.landmarks_path = value.to_string();
            }

            ["api_keys", "vision"] => {
                self.api_keys.vision = value.to_string();
            }
            ["api_keys", "places"] => {
                self.api_keys.places = value.to_string();
            }
            ["api_keys", "openai"] => {
                self.api_keys.openai = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.radius",
            "defaults.format",
            "defaults.language",
            "server.host",
            "server.port",
            "server.audio_dir",
            "providers.timeout_secs",
            "providers.summary_model",
            "classifier.model_path",
            "classifier.landmarks_path",
            "api_keys.vision",
            "api_keys.places",
            "api_keys.openai",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Timeout applied to every external call
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.providers.timeout_secs.max(1))
    }

    pub fn audio_dir(&self) -> PathBuf {
        PathBuf::from(&self.server.audio_dir)
    }

    /// Cloud Vision key from config or `GOOGLE_VISION_API_KEY`
    pub fn vision_key(&self) -> Option<String> {
        key_or_env(&self.api_keys.vision, VISION_KEY_ENV)
    }

    /// Places key from config or `GOOGLE_PLACES_API_KEY`
    pub fn places_key(&self) -> Option<String> {
        key_or_env(&self.api_keys.places, PLACES_KEY_ENV)
    }

    /// OpenAI key from config or `OPENAI_API_KEY`
    pub fn openai_key(&self) -> Option<String> {
        key_or_env(&self.api_keys.openai, OPENAI_KEY_ENV)
    }

    pub fn model_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.classifier.model_path)
    }

    pub fn landmarks_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.classifier.landmarks_path)
    }
}
