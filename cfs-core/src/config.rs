//! Client configuration management.
//!
//! Handles loading, saving, and accessing client configuration: the API
//! endpoint, the access credential, request timeout, and logging preferences.
//! Configuration is persisted as TOML on disk.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{CfsError, CfsResult};
use crate::platform::Platform;

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// CloudFS API endpoint (e.g., "abc123.cloudfs.io" or "https://abc123.cloudfs.io").
    #[serde(default)]
    pub endpoint: String,

    /// OAuth access token.
    #[serde(default)]
    pub access_token: String,

    /// Token type placed before the token in the `Authorization` header.
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// API request timeout in milliseconds. Zero disables the timeout.
    #[serde(default = "default_api_timeout")]
    pub api_timeout_ms: u64,

    /// Whether to accept self-signed TLS certificates from the server.
    #[serde(default)]
    pub accept_self_signed_certs: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_token_type() -> String {
    constants::DEFAULT_TOKEN_TYPE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_token: String::new(),
            token_type: default_token_type(),
            api_timeout_ms: default_api_timeout(),
            accept_self_signed_certs: false,
        }
    }
}

// Keeps the access token out of logs and debug dumps.
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("endpoint", &self.endpoint)
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("api_timeout_ms", &self.api_timeout_ms)
            .field("accept_self_signed_certs", &self.accept_self_signed_certs)
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> CfsResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> CfsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> CfsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CfsError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> CfsResult<PathBuf> {
        let config_dir = Platform::config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> CfsResult<PathBuf> {
        if self.logging.directory.is_empty() {
            let data_dir = Platform::data_dir()?;
            Ok(data_dir.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Check whether the server connection is configured.
    pub fn is_server_configured(&self) -> bool {
        !self.server.endpoint.trim().is_empty() && !self.server.access_token.trim().is_empty()
    }

    /// Sanitize and normalize an API endpoint.
    ///
    /// Strips whitespace and quotes, adds `https://` when no scheme is given,
    /// and removes trailing slashes. Explicit `http://` is kept for local
    /// servers.
    pub fn sanitize_endpoint(endpoint: &str) -> String {
        let trimmed = endpoint.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("{}://{trimmed}", constants::DEFAULT_SCHEME)
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}
