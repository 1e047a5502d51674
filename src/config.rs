//! Application configuration management.
//!
//! This module handles the persistent configuration for sonicly: the YouTube
//! API key, which audio extraction service to use and its credentials, the API
//! endpoint, and synthesis/network tuning. Configuration is stored in the
//! user's config directory (typically ~/.config/sonicly/config.toml). The user
//! music preferences live next to it in preferences.toml.
//!
//! A handful of environment variables override the stored values so keys can
//! be supplied without writing them to disk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{
    DEFAULT_BACKEND_URL, DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE,
    YOUTUBE_API_BASE_URL,
};

pub const ENV_YOUTUBE_API_KEY: &str = "SONICLY_YOUTUBE_API_KEY";
pub const ENV_RAPIDAPI_KEY: &str = "SONICLY_RAPIDAPI_KEY";
pub const ENV_BACKEND_URL: &str = "SONICLY_BACKEND_URL";
pub const ENV_EXTRACTION_SERVICE: &str = "SONICLY_AUDIO_EXTRACTION_SERVICE";

/// Keys accepted by [`Config::set_value`]
pub const CONFIG_KEYS: &[&str] = &[
    "youtube_api_key",
    "audio_extraction_service",
    "rapidapi_key",
    "custom_backend_url",
    "base_url",
    "sample_rate",
    "request_timeout_secs",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("unable to find config directory")]
    Directories,
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Backend that turns a video id into an audio URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionService {
    #[default]
    Demo,
    RapidApi,
    Custom,
}

impl fmt::Display for ExtractionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionService::Demo => "demo",
            ExtractionService::RapidApi => "rapidapi",
            ExtractionService::Custom => "custom",
        };
        f.write_str(name)
    }
}

impl FromStr for ExtractionService {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demo" => Ok(ExtractionService::Demo),
            "rapidapi" => Ok(ExtractionService::RapidApi),
            "custom" => Ok(ExtractionService::Custom),
            other => Err(ConfigError::InvalidValue {
                key: "audio_extraction_service".to_string(),
                reason: format!("'{other}' is not one of demo, rapidapi, custom"),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub youtube_api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub audio_extraction_service: ExtractionService,
    #[serde(default)]
    pub rapidapi_key: String,
    #[serde(default = "default_backend_url")]
    pub custom_backend_url: String,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    YOUTUBE_API_BASE_URL.to_string()
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            youtube_api_key: String::new(),
            base_url: default_base_url(),
            audio_extraction_service: ExtractionService::default(),
            rapidapi_key: String::new(),
            custom_backend_url: default_backend_url(),
            sample_rate: default_sample_rate(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        // Check for XDG_CONFIG_HOME first (useful for testing)
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("sonicly")
        } else {
            dirs::config_dir()
                .ok_or(ConfigError::Directories)?
                .join("sonicly")
        };
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn preferences_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("preferences.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Default::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the stored config and apply environment overrides on top
    pub fn load_effective() -> Result<Self, ConfigError> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    pub fn exists() -> Result<bool, ConfigError> {
        Ok(Self::config_path()?.exists())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = env_value(ENV_YOUTUBE_API_KEY) {
            self.youtube_api_key = key;
        }
        if let Some(key) = env_value(ENV_RAPIDAPI_KEY) {
            self.rapidapi_key = key;
        }
        if let Some(url) = env_value(ENV_BACKEND_URL) {
            self.custom_backend_url = url;
        }
        if let Some(service) = env_value(ENV_EXTRACTION_SERVICE) {
            match service.parse() {
                Ok(service) => self.audio_extraction_service = service,
                Err(e) => log::warn!("Ignoring {ENV_EXTRACTION_SERVICE}: {e}"),
            }
        }
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "youtube_api_key" => self.youtube_api_key = value.trim().to_string(),
            "audio_extraction_service" => self.audio_extraction_service = value.parse()?,
            "rapidapi_key" => self.rapidapi_key = value.trim().to_string(),
            "custom_backend_url" => self.custom_backend_url = parse_url(key, value)?,
            "base_url" => self.base_url = parse_url(key, value)?,
            "sample_rate" => {
                let rate = parse_positive(key, value)?;
                if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&rate) {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        reason: format!("must be between {MIN_SAMPLE_RATE} and {MAX_SAMPLE_RATE} Hz"),
                    });
                }
                self.sample_rate = rate;
            }
            "request_timeout_secs" => {
                self.request_timeout_secs = parse_positive(key, value)?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// The API key with everything but the last four characters hidden
    pub fn masked_api_key(&self) -> String {
        mask_secret(&self.youtube_api_key)
    }
}

pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        return "(not set)".to_string();
    }
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_url(key: &str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim().trim_end_matches('/');
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "must start with http:// or https://".to_string(),
        })
    }
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "must be a positive integer".to_string(),
        }),
    }
}
