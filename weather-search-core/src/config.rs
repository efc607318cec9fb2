use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Base URL of the weather backend used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Base URL of the WeatherAPI.com v1 endpoints.
pub const DEFAULT_WEATHERAPI_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Address the backend binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "localhost".to_string(), port: 8000 }
    }
}

/// Credentials for the upstream WeatherAPI.com provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    pub api_key: String,
    #[serde(default = "default_weatherapi_base_url")]
    pub base_url: String,
}

fn default_weatherapi_base_url() -> String {
    DEFAULT_WEATHERAPI_BASE_URL.to_string()
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend the search controller talks to.
    pub api_base_url: String,

    pub server: ServerConfig,

    /// Example TOML:
    /// [weatherapi]
    /// api_key = "..."
    pub weatherapi: Option<WeatherApiConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            server: ServerConfig::default(),
            weatherapi: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-search", "weather-search")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the backend base URL after checking it parses as an absolute URL.
    pub fn set_api_base_url(&mut self, url: &str) -> Result<()> {
        let trimmed = url.trim();
        reqwest::Url::parse(trimmed).with_context(|| format!("Invalid base URL '{trimmed}'"))?;
        self.api_base_url = trimmed.trim_end_matches('/').to_string();
        Ok(())
    }

    /// Set or replace the WeatherAPI key, keeping any custom base URL.
    pub fn set_weatherapi_api_key(&mut self, api_key: String) {
        match self.weatherapi.as_mut() {
            Some(cfg) => cfg.api_key = api_key,
            None => {
                self.weatherapi =
                    Some(WeatherApiConfig { api_key, base_url: default_weatherapi_base_url() })
            }
        }
    }

    /// Returns the WeatherAPI config, or an error telling the user how to add it.
    pub fn weatherapi(&self) -> Result<&WeatherApiConfig> {
        self.weatherapi.as_ref().filter(|cfg| !cfg.api_key.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured for WeatherAPI.\n\
                 Hint: run `weather-search configure` and enter your API key."
            )
        })
    }

    /// `host:port` string the backend binds to.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
