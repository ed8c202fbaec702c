//! Client configuration.
//!
//! Configuration is stored in `.backlog/config.yaml` and includes:
//! - The tracker API base URL
//! - The default reporter for newly created issues
//!
//! `BACKLOG_API_URL` overrides the configured base URL.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{BacklogError, Result};

pub const CONFIG_DIR: &str = ".backlog";

const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the tracker REST API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Reporter used when `issue create` is not given one explicitly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_reporter_id: Option<u64>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Resolve the API base URL: environment variable, then config file,
    /// then the development default.
    pub fn api_url(&self) -> Result<Url> {
        let raw = if let Ok(url) = env::var("BACKLOG_API_URL")
            && !url.is_empty()
        {
            url
        } else {
            self.api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        };

        Url::parse(&raw).map_err(|e| BacklogError::Config(format!("invalid API URL '{raw}': {e}")))
    }

    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        Url::parse(url)
            .map_err(|e| BacklogError::Config(format!("invalid API URL '{url}': {e}")))?;
        self.api_url = Some(url.to_string());
        Ok(())
    }

    pub fn set_default_reporter(&mut self, user_id: u64) {
        self.default_reporter_id = Some(user_id);
    }

    /// Resolve the reporter for a new issue. An explicit id always wins;
    /// otherwise fall back to the configured default.
    pub fn resolve_reporter(&self, explicit: Option<u64>) -> Result<u64> {
        explicit.or(self.default_reporter_id).ok_or_else(|| {
            BacklogError::Config(
                "no reporter given and no default_reporter_id configured".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_api_url_env_override() {
        let config = Config {
            api_url: Some("http://tracker.internal:8080".to_string()),
            default_reporter_id: None,
        };

        unsafe { env::set_var("BACKLOG_API_URL", "http://override:9999") };
        let url = config.api_url().unwrap();
        unsafe { env::remove_var("BACKLOG_API_URL") };

        assert_eq!(url.as_str(), "http://override:9999/");
    }

    #[test]
    #[serial]
    fn test_api_url_falls_back_to_default() {
        unsafe { env::remove_var("BACKLOG_API_URL") };
        let config = Config::default();
        assert_eq!(config.api_url().unwrap().as_str(), "http://localhost:3001/");
    }

    #[test]
    #[serial]
    fn test_invalid_api_url_rejected() {
        unsafe { env::remove_var("BACKLOG_API_URL") };
        let mut config = Config::default();
        assert!(config.set_api_url("not a url").is_err());
        config.api_url = Some("::garbage::".to_string());
        assert!(config.api_url().is_err());
    }

    #[test]
    fn test_resolve_reporter() {
        let mut config = Config::default();
        assert!(config.resolve_reporter(None).is_err());
        assert_eq!(config.resolve_reporter(Some(3)).unwrap(), 3);

        config.set_default_reporter(1);
        assert_eq!(config.resolve_reporter(None).unwrap(), 1);
        assert_eq!(config.resolve_reporter(Some(5)).unwrap(), 5);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.set_api_url("http://tracker.example.com").unwrap();
        config.set_default_reporter(2);

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed: Config = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(parsed.api_url.as_deref(), Some("http://tracker.example.com"));
        assert_eq!(parsed.default_reporter_id, Some(2));
    }
}
