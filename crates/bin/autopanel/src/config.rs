//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `autopanel.toml` in the working directory unless `--config`
//! names another file. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values, and the
//! `--backend-url` flag takes precedence over both.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// File read when no `--config` path is given.
pub const DEFAULT_PATH: &str = "autopanel.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub backend: BackendConfig,
    /// Credentials sent with every request.
    pub auth: AuthConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Automation backend configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend origin (e.g. `http://localhost:8000`).
    pub url: String,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

/// Session credentials.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Raw `Cookie` header value, e.g. `session=abc123`.
    pub session_cookie: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (or `autopanel.toml` if present), apply
    /// environment-variable overrides, then the `--backend-url` flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, if an explicitly requested
    /// file is missing, or if the resulting configuration is invalid.
    pub fn load(path: Option<&Path>, backend_url: Option<String>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, true)?,
            None => Self::from_file(Path::new(DEFAULT_PATH), false)?,
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        if let Some(url) = backend_url {
            config.backend.url = url;
        }
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("AUTOPANEL_BACKEND_URL") {
            self.backend.url = val;
        }
        if let Some(secs) = var("AUTOPANEL_TIMEOUT_SECS").and_then(|val| val.parse().ok()) {
            self.backend.timeout_secs = secs;
        }
        if let Some(val) = var("AUTOPANEL_SESSION_COOKIE") {
            self.auth.session_cookie = Some(val);
        }
        if let Some(val) = var("AUTOPANEL_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation(
                "backend url must not be empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "backend url must use http or https, got {url:?}"
            )));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    /// Return the session cookie, ignoring blank values.
    #[must_use]
    pub fn session_cookie(&self) -> Option<&str> {
        self.auth
            .session_cookie
            .as_deref()
            .map(str::trim)
            .filter(|cookie| !cookie.is_empty())
    }

    /// Return the settings of the HTTP gateway adapter.
    #[must_use]
    pub fn gateway(&self) -> autopanel_adapter_http_reqwest::Config {
        autopanel_adapter_http_reqwest::Config {
            base_url: self.backend.url.trim().to_string(),
            timeout: self.timeout(),
            session_cookie: self.session_cookie().map(ToString::to_string),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "autopanel=warn,autopanel_app=warn,autopanel_adapter_http_reqwest=warn"
                .to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.url, "http://localhost:8000");
        assert_eq!(config.backend.timeout_secs, 10);
        assert!(config.auth.session_cookie.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [backend]
            url = 'https://automations.example.com'
            timeout_secs = 3

            [auth]
            session_cookie = 'session=abc123'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.url, "https://automations.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.session_cookie(), Some("session=abc123"));
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [backend]
            timeout_secs = 30
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.backend.url, "http://localhost:8000");
    }

    #[test]
    fn should_return_default_when_default_file_not_found() {
        let config = Config::from_file(Path::new("nonexistent.toml"), false).unwrap();
        assert_eq!(config.backend.timeout_secs, 10);
    }

    #[test]
    fn should_fail_when_requested_file_not_found() {
        let result = Config::from_file(Path::new("nonexistent.toml"), true);
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_prefer_environment_over_file_values() {
        let mut config: Config = toml::from_str("[backend]\nurl = 'http://file:1'").unwrap();
        config.apply_overrides(env(&[
            ("AUTOPANEL_BACKEND_URL", "http://env:2"),
            ("AUTOPANEL_TIMEOUT_SECS", "5"),
            ("AUTOPANEL_SESSION_COOKIE", "session=env"),
        ]));
        assert_eq!(config.backend.url, "http://env:2");
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.session_cookie(), Some("session=env"));
    }

    #[test]
    fn should_ignore_unparsable_timeout_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("AUTOPANEL_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.backend.timeout_secs, 10);
    }

    #[test]
    fn should_prefer_rust_log_over_autopanel_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("AUTOPANEL_LOG", "info"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_reject_zero_timeout() {
        let mut config = Config::default();
        config.backend.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_empty_or_non_http_url() {
        let mut config = Config::default();
        config.backend.url = "  ".to_string();
        assert!(config.validate().is_err());
        config.backend.url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_ignore_blank_session_cookie() {
        let mut config = Config::default();
        config.auth.session_cookie = Some("   ".to_string());
        assert!(config.gateway().session_cookie.is_none());
    }
}
