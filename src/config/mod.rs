//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/opencage-search/config.toml

pub mod defaults;

use crate::constants::api::OPENCAGE_URL;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geocode::opencage::GeocoderOptions;
use crate::source::SourceConfig;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding provider settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Search source display settings
    #[serde(default)]
    pub source: SourceSettings,

    /// Default map view
    #[serde(default)]
    pub view: ViewConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// OpenCage API key
    #[serde(default)]
    pub api_key: String,
}

/// Search source display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    #[serde(default = "default_suggestions_enabled")]
    pub suggestions_enabled: bool,

    #[serde(default = "default_min_suggest_characters")]
    pub min_suggest_characters: usize,
}

/// Default map view, used when the host gives no center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_view_lat")]
    pub lat: f64,

    #[serde(default = "default_view_lng")]
    pub lng: f64,
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
}

// Default value functions for serde
fn default_endpoint() -> String {
    OPENCAGE_URL.to_string()
}
fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}
fn default_suggestions_enabled() -> bool {
    DEFAULT_SUGGESTIONS_ENABLED
}
fn default_min_suggest_characters() -> usize {
    DEFAULT_MIN_SUGGEST_CHARACTERS
}
fn default_view_lat() -> f64 {
    DEFAULT_VIEW_LAT
}
fn default_view_lng() -> f64 {
    DEFAULT_VIEW_LNG
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            suggestions_enabled: default_suggestions_enabled(),
            min_suggest_characters: default_min_suggest_characters(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            lat: default_view_lat(),
            lng: default_view_lng(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
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
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
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
            ["geocoder", "endpoint"] => Some(self.geocoder.endpoint.clone()),
            ["geocoder", "api_key"] => Some(self.geocoder.api_key.clone()),

            ["source", "placeholder"] => Some(self.source.placeholder.clone()),
            ["source", "suggestions_enabled"] => Some(self.source.suggestions_enabled.to_string()),
            ["source", "min_suggest_characters"] => {
                Some(self.source.min_suggest_characters.to_string())
            }

            ["view", "lat"] => Some(self.view.lat.to_string()),
            ["view", "lng"] => Some(self.view.lng.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "endpoint"] => {
                self.geocoder.endpoint = value.to_string();
            }
            ["geocoder", "api_key"] => {
                self.geocoder.api_key = value.to_string();
            }

            ["source", "placeholder"] => {
                self.source.placeholder = value.to_string();
            }
            ["source", "suggestions_enabled"] => {
                self.source.suggestions_enabled = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }
            ["source", "min_suggest_characters"] => {
                self.source.min_suggest_characters = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid character count: {}", value))
                })?;
            }

            ["view", "lat"] => {
                let lat: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid latitude: {}", value))
                })?;
                Coordinates::new(lat, self.view.lng).validate()?;
                self.view.lat = lat;
            }
            ["view", "lng"] => {
                let lng: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid longitude: {}", value))
                })?;
                Coordinates::new(self.view.lat, lng).validate()?;
                self.view.lng = lng;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
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
            "geocoder.endpoint",
            "geocoder.api_key",
            "source.placeholder",
            "source.suggestions_enabled",
            "source.min_suggest_characters",
            "view.lat",
            "view.lng",
            "server.host",
            "server.port",
        ]
    }

    /// API key to use: an explicit override wins over the stored key
    pub fn api_key(&self, override_key: Option<&str>) -> Result<String> {
        override_key
            .filter(|k| !k.trim().is_empty())
            .map(str::to_string)
            .or_else(|| Some(self.geocoder.api_key.clone()).filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                Error::Config(format!(
                    "No API key: set geocoder.api_key or {}",
                    API_KEY_ENV
                ))
            })
    }

    /// Request options for the geocoding client
    pub fn geocoder_options(&self) -> GeocoderOptions {
        GeocoderOptions {
            endpoint: self.geocoder.endpoint.clone(),
            ..GeocoderOptions::default()
        }
    }

    /// Settings handed to the search source
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            placeholder: self.source.placeholder.clone(),
            suggestions_enabled: self.source.suggestions_enabled,
            min_suggest_characters: self.source.min_suggest_characters,
        }
    }

    /// Default view center
    pub fn view_center(&self) -> Coordinates {
        Coordinates::new(self.view.lat, self.view.lng)
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.geocoder.endpoint, OPENCAGE_URL);
        assert!(config.geocoder.api_key.is_empty());
        assert_eq!(config.source.placeholder, "example: W10");
        assert_eq!(config.source.min_suggest_characters, 3);
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("source.suggestions_enabled"), Some("true".to_string()));
        config.set("source.suggestions_enabled", "false").unwrap();
        assert_eq!(config.get("source.suggestions_enabled"), Some("false".to_string()));

        config.set("source.min_suggest_characters", "5").unwrap();
        assert_eq!(config.source.min_suggest_characters, 5);

        config.set("view.lat", "51.5").unwrap();
        assert_eq!(config.get("view.lat"), Some("51.5".to_string()));
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("source.min_suggest_characters", "three").is_err());
        assert!(config.set("server.port", "99999").is_err());
        assert!(config.set("view.lat", "95").is_err());
        assert_eq!(config.view.lat, DEFAULT_VIEW_LAT);
    }

    #[test]
    fn test_api_key_resolution() {
        let mut config = Config::default();
        assert!(config.api_key(None).is_err());
        assert!(config.api_key(Some("  ")).is_err());

        config.geocoder.api_key = "stored".to_string();
        assert_eq!(config.api_key(None).unwrap(), "stored");
        assert_eq!(config.api_key(Some("override")).unwrap(), "override");
    }

    #[test]
    fn test_derived_settings() {
        let mut config = Config::default();
        config.geocoder.endpoint = "http://localhost:9999/json".to_string();
        config.source.min_suggest_characters = 4;

        let options = config.geocoder_options();
        assert_eq!(options.endpoint, "http://localhost:9999/json");
        assert_eq!(options.limit, 6);

        assert_eq!(config.source_config().min_suggest_characters, 4);
        assert_eq!(config.view_center(), Coordinates::new(54.00366, -2.547855));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.geocoder.api_key = "abc123".to_string();
        config.source.placeholder = "Search places".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.geocoder.api_key, "abc123");
        assert_eq!(loaded.source.placeholder, "Search places");
    }

    #[test]
    fn test_load_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let loaded = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(loaded.server.port, 7878);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[geocoder]\napi_key = \"k\"\n").unwrap();
        assert_eq!(loaded.geocoder.api_key, "k");
        assert_eq!(loaded.geocoder.endpoint, OPENCAGE_URL);
        assert!(loaded.source.suggestions_enabled);
    }

    #[test]
    fn test_serialization_format() {
        let toml = toml::to_string_pretty(&Config::default()).unwrap();

        assert!(toml.contains("[geocoder]"));
        assert!(toml.contains("[source]"));
        assert!(toml.contains("[view]"));
        assert!(toml.contains("[server]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7878");
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        let config = Config::default();
        for key in &keys {
            assert!(config.get(key).is_some(), "missing getter for {}", key);
        }
    }
}
