//! Configuration handling.
//!
//! Configuration is stored in `.rivalscope/config.yaml` and includes:
//! - Backend base URL and request timeout
//! - List page size and search language
//! - Identity-provider publishable key and session token
//!
//! Environment variables take precedence over the file.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScopeError};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::types::CONFIG_DIR;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_SEARCH_LANGUAGE: &str = "es";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const API_URL_ENV: &str = "RIVALSCOPE_API_URL";
pub const PUBLISHABLE_KEY_ENV: &str = "RIVALSCOPE_PUBLISHABLE_KEY";
pub const SESSION_TOKEN_ENV: &str = "RIVALSCOPE_SESSION_TOKEN";

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_search_language() -> String {
    DEFAULT_SEARCH_LANGUAGE.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL; empty means "use the environment or the default"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_search_language")]
    pub search_language: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    #[serde(default)]
    pub auth: AuthSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            search_language: default_search_language(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            auth: AuthSettings::default(),
        }
    }
}

/// Identity settings
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishable_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field(
                "publishable_key",
                &self.publishable_key.as_deref().map(mask_sensitive_value),
            )
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Show only the first 2 and last 2 characters of a sensitive value.
pub fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
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
        config.validate()?;
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

    pub(crate) fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > 100 {
            return Err(ScopeError::Config(format!(
                "page_size must be between 1 and 100, got {}",
                self.page_size
            )));
        }
        if self.request_timeout == 0 {
            return Err(ScopeError::Config(
                "request_timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Backend base URL from environment, config file, or the default
    pub fn api_url(&self) -> String {
        if let Some(url) = env_value(API_URL_ENV) {
            return url;
        }
        self.api_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Identity-provider publishable key from environment or config file
    pub fn publishable_key(&self) -> Option<String> {
        if let Some(key) = env_value(PUBLISHABLE_KEY_ENV) {
            return Some(key);
        }
        self.auth.publishable_key.clone()
    }

    /// Session token from environment or config file
    pub fn session_token(&self) -> Option<SecretString> {
        env_value(SESSION_TOKEN_ENV)
            .or_else(|| self.auth.session_token.clone())
            .map(SecretString::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_guards::{EnvGuard, clean_env};
    use serial_test::serial;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.search_language, "es");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.auth.publishable_key.is_none());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = serde_yaml_ng::from_str("api_url: https://intel.example\n").unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://intel.example"));
        assert_eq!(config.page_size, 20);
        assert_eq!(config.search_language, "es");
    }

    #[test]
    fn test_page_size_is_validated() {
        let config: Config = serde_yaml_ng::from_str("page_size: 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ScopeError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let config = Config {
            api_url: Some("https://from-file.example".to_string()),
            ..Config::default()
        };
        let _clean = unsafe { clean_env() };
        assert_eq!(config.api_url(), "https://from-file.example");

        let _guard = unsafe { EnvGuard::set(API_URL_ENV, "https://from-env.example") };
        assert_eq!(config.api_url(), "https://from-env.example");
    }

    #[test]
    #[serial]
    fn test_default_api_url() {
        let _clean = unsafe { clean_env() };
        assert_eq!(Config::default().api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config {
            auth: AuthSettings {
                publishable_key: Some("pk_test_abcdef".to_string()),
                session_token: Some("sess_secret_value".to_string()),
            },
            ..Config::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sess_secret_value"));
        assert!(!debug.contains("pk_test_abcdef"));
        assert!(debug.contains("pk...ef"));
    }

    #[test]
    fn test_mask_short_value() {
        assert_eq!(mask_sensitive_value("abc"), "****");
    }
}
