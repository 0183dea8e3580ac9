//! Application configuration

use std::env;

use anyhow::{Context, Result};

use crate::domain::value_objects::GameRules;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Credential for the lesson generator; the engine cannot start without it
    pub api_key: String,
    /// Gemini API base URL
    pub gemini_base_url: String,
    /// Model used for both lessons and evaluations
    pub gemini_model: String,
    /// Per-request timeout for generator calls
    pub gemini_timeout_secs: u64,

    /// HTTP server port
    pub server_port: u16,
    /// Directory with the browser client, served at `/` when set
    pub static_dir: Option<String>,

    pub rules: GameRules,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            api_key: lookup("API_KEY")
                .filter(|key| !key.trim().is_empty())
                .context("API_KEY environment variable is required")?,
            gemini_base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.5-flash".to_string()),
            gemini_timeout_secs: lookup("GEMINI_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("GEMINI_TIMEOUT_SECS must be a number of seconds")?,

            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            static_dir: lookup("STATIC_DIR").filter(|dir| !dir.is_empty()),

            rules: GameRules::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn test_defaults_apply() {
        let config = AppConfig::from_lookup(lookup(&[("API_KEY", "secret")])).unwrap();
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.gemini_timeout_secs, 30);
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result =
            AppConfig::from_lookup(lookup(&[("API_KEY", "secret"), ("SERVER_PORT", "nope")]));
        assert!(result.is_err());
    }
}
