//! CLI command implementations.

pub mod alter;
pub mod config;
pub mod ping;
pub mod profile;

use cfs_api::ApiClient;
use cfs_core::config::AppConfig;
use cfs_core::error::CfsResult;

/// Helper to create an API client from config.
pub fn create_api_client(config: &AppConfig) -> CfsResult<ApiClient> {
    ApiClient::from_config(&config.server)
}

/// Print a serializable value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(5_368_709_120), "5.00 GB");
    }

    #[test]
    fn test_create_api_client_requires_token() {
        let mut config = AppConfig::default();
        config.server.endpoint = "abc.cloudfs.io".into();
        assert!(create_api_client(&config).is_err());

        config.server.access_token = "tok".into();
        assert!(create_api_client(&config).is_ok());
    }
}
