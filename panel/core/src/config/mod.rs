//! TOML Configuration File Support
//!
//! Centralized configuration loading for hrquery, supporting a TOML file at
//! `~/.config/hrquery/config.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied by the caller through [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [service]
//! base_url = "http://127.0.0.1:8000"
//! chat_path = "/chat"
//! health_path = "/"
//! connect_timeout_ms = 5000
//!
//! [ui]
//! title = "HR Chatbot"
//! subtitle = "Ask a question to find relevant employees"
//! placeholder = "e.g., 'Find Python developers with 3+ years experience'"
//! ```
//!
//! # Environment Variables
//!
//! - `HRQUERY_SERVICE_URL`: service base URL
//! - `HRQUERY_CHAT_PATH`: query endpoint path
//! - `HRQUERY_HEALTH_PATH`: reachability probe path
//! - `HRQUERY_CONNECT_TIMEOUT_MS`: connect timeout (0 disables it)

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Service section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceToml {
    /// Base URL of the query service
    pub base_url: Option<String>,

    /// Path of the query endpoint
    pub chat_path: Option<String>,

    /// Path of the reachability probe
    pub health_path: Option<String>,

    /// Connect timeout in milliseconds (0 = none)
    pub connect_timeout_ms: Option<u64>,
}

/// UI section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiToml {
    /// Header title
    pub title: Option<String>,

    /// Header subtitle
    pub subtitle: Option<String>,

    /// Placeholder shown in the empty input
    pub placeholder: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelToml {
    /// Service configuration section
    pub service: ServiceToml,

    /// UI configuration section
    pub ui: UiToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Where and how to reach the query service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL (scheme, host, port)
    pub base_url: String,
    /// Path of the query endpoint
    pub chat_path: String,
    /// Path of the reachability probe
    pub health_path: String,
    /// Connect timeout; `None` waits as long as the OS does
    pub connect_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            chat_path: "/chat".to_string(),
            health_path: "/".to_string(),
            connect_timeout: None,
        }
    }
}

/// Text shown by the surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Header title
    pub title: String,
    /// Header subtitle
    pub subtitle: String,
    /// Placeholder shown in the empty input
    pub placeholder: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "HR Chatbot".to_string(),
            subtitle: "Ask a question to find relevant employees".to_string(),
            placeholder: "e.g., 'Find Python developers with 3+ years experience'".to_string(),
        }
    }
}

/// Centralized configuration
///
/// Use [`load_config`] to load configuration with proper priority handling.
#[derive(Clone, Debug)]
pub struct PanelConfig {
    /// Service connection
    pub service: ServiceConfig,

    /// Surface text
    pub ui: UiConfig,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            ui: UiConfig::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl PanelConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check values that would make the service unreachable by construction
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a base URL that is not an
    /// absolute http(s) URL, or an endpoint path without a leading `/`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.service.base_url).map_err(|e| {
            ConfigError::ValidationError(format!(
                "service.base_url '{}' is not a valid URL: {}",
                self.service.base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "service.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        for (name, path) in [
            ("service.chat_path", &self.service.chat_path),
            ("service.health_path", &self.service.health_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must start with '/', got '{path}'"
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/hrquery/config.toml` or
/// `~/.config/hrquery/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hrquery").join("config.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or the
/// merged configuration is invalid. A missing config file is not an error.
pub fn load_config() -> Result<PanelConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<PanelConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration using a custom environment lookup
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<PanelConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Start with defaults
    let mut config = PanelConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: PanelToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Environment overrides file values
    apply_env_config(&mut config, env);

    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut PanelConfig, toml: &PanelToml) {
    if let Some(ref url) = toml.service.base_url {
        config.service.base_url = url.clone();
    }
    if let Some(ref path) = toml.service.chat_path {
        config.service.chat_path = path.clone();
    }
    if let Some(ref path) = toml.service.health_path {
        config.service.health_path = path.clone();
    }
    if let Some(ms) = toml.service.connect_timeout_ms {
        config.service.connect_timeout = timeout_from_ms(ms);
    }

    if let Some(ref title) = toml.ui.title {
        config.ui.title = title.clone();
    }
    if let Some(ref subtitle) = toml.ui.subtitle {
        config.ui.subtitle = subtitle.clone();
    }
    if let Some(ref placeholder) = toml.ui.placeholder {
        config.ui.placeholder = placeholder.clone();
    }
}

/// Apply environment variable overrides
fn apply_env_config<F>(config: &mut PanelConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let mut from_env = false;

    if let Some(url) = env("HRQUERY_SERVICE_URL") {
        config.service.base_url = url;
        from_env = true;
    }
    if let Some(path) = env("HRQUERY_CHAT_PATH") {
        config.service.chat_path = path;
        from_env = true;
    }
    if let Some(path) = env("HRQUERY_HEALTH_PATH") {
        config.service.health_path = path;
        from_env = true;
    }
    if let Some(raw) = env("HRQUERY_CONNECT_TIMEOUT_MS") {
        match raw.trim().parse::<u64>() {
            Ok(ms) => {
                config.service.connect_timeout = timeout_from_ms(ms);
                from_env = true;
            }
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Ignoring invalid HRQUERY_CONNECT_TIMEOUT_MS");
            }
        }
    }

    if from_env {
        config.source = ConfigSource::Env;
    }
}

fn timeout_from_ms(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Service base URL override
    pub base_url: Option<String>,

    /// Connect timeout override (milliseconds)
    pub connect_timeout_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL override
    #[must_use]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set connect timeout override
    #[must_use]
    pub fn with_connect_timeout_ms(mut self, ms: u64) -> Self {
        self.connect_timeout_ms = Some(ms);
        self
    }

    /// Apply overrides to a configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the result is invalid.
    pub fn apply(&self, config: &mut PanelConfig) -> Result<(), ConfigError> {
        if self.base_url.is_some() || self.connect_timeout_ms.is_some() {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref url) = self.base_url {
            config.service.base_url = url.clone();
        }

        if let Some(ms) = self.connect_timeout_ms {
            config.service.connect_timeout = timeout_from_ms(ms);
        }

        config.validate()
    }
}

// =============================================================================
// Tests
// =============================================================================
