//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, use_color};
use crate::auth::AuthConfig;
use crate::cli::OutputOptions;
use crate::config::{Config, mask_sensitive_value};
use crate::error::{Result, ScopeError};

/// Keys accepted by `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api_url",
    "page_size",
    "search_language",
    "request_timeout",
    "auth.publishable_key",
    "auth.session_token",
];

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ScopeError::Config(format!("{key} must be a number, got '{value}'")))
}

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let auth = AuthConfig::from_config(&config);
    let key = config.publishable_key();
    let session_configured = config.session_token().is_some();

    let json_output = json!({
        "api_url": config.api_url(),
        "page_size": config.page_size,
        "search_language": config.search_language,
        "request_timeout": config.request_timeout,
        "auth": {
            "enabled": auth.is_enabled(),
            "publishable_key": key.as_deref().map(mask_sensitive_value),
            "session_token_configured": session_configured,
        },
        "config_file": Config::config_path().to_string_lossy(),
    });

    let color = use_color(output);
    let title = |s: &str| if color { s.cyan().to_string() } else { s.to_string() };

    let mut text = String::new();
    text.push_str(&format!("{}\n\n", title("Configuration:")));
    text.push_str(&format!("{}: {}\n", title("api_url"), config.api_url()));
    text.push_str(&format!("{}: {}\n", title("page_size"), config.page_size));
    text.push_str(&format!("{}: {}\n", title("search_language"), config.search_language));
    text.push_str(&format!("{}: {}s\n\n", title("request_timeout"), config.request_timeout));

    text.push_str(&format!("{}:\n", title("auth")));
    let enabled = if auth.is_enabled() { "enabled" } else { "disabled" };
    text.push_str(&format!("  status: {enabled}\n"));
    text.push_str(&format!(
        "  publishable_key: {}\n",
        key.as_deref()
            .map(mask_sensitive_value)
            .unwrap_or_else(|| "not configured".to_string())
    ));
    let session = if session_configured { "configured" } else { "not configured" };
    text.push_str(&format!("  session_token: {session}\n\n"));
    text.push_str(&format!("Config file: {}", Config::config_path().display()));

    CommandOutput::new(json_output).with_text(text).print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let mut config = Config::load()?;

    let shown = match key {
        "api_url" => {
            url::Url::parse(value.trim())?;
            config.api_url = Some(value.trim().to_string());
            value.trim().to_string()
        }
        "page_size" => {
            config.page_size = parse_number(key, value)?;
            config.page_size.to_string()
        }
        "search_language" => {
            config.search_language = value.trim().to_string();
            config.search_language.clone()
        }
        "request_timeout" => {
            config.request_timeout = parse_number(key, value)?;
            config.request_timeout.to_string()
        }
        "auth.publishable_key" => {
            config.auth.publishable_key = Some(value.trim().to_string());
            mask_sensitive_value(value.trim())
        }
        "auth.session_token" => {
            config.auth.session_token = Some(value.trim().to_string());
            mask_sensitive_value(value.trim())
        }
        other => {
            return Err(ScopeError::Config(format!(
                "unknown config key '{other}'. Valid keys: {}",
                CONFIG_KEYS.join(", ")
            )));
        }
    };

    config.validate()?;
    config.save()?;

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": shown,
        "success": true,
    }))
    .with_text(format!("Set {key} = {shown}"))
    .print(output)
}
