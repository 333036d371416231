//! Credential store.
//!
//! A `Credential` bundles the endpoint and token material that identify the
//! caller to the CloudFS API. It is built once and then only borrowed; no API
//! operation mutates it.

use std::fmt;

use crate::config::{AppConfig, ServerConfig};
use crate::constants;
use crate::error::{CfsError, CfsResult};

/// Authentication material for CloudFS requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    base_url: String,
    access_token: String,
    token_type: String,
}

impl Credential {
    /// Create a credential for `endpoint` using a bearer token.
    ///
    /// The endpoint may omit the scheme, in which case `https` is assumed.
    pub fn new(endpoint: &str, access_token: impl Into<String>) -> CfsResult<Self> {
        let base_url = AppConfig::sanitize_endpoint(endpoint);
        if base_url.is_empty() {
            return Err(CfsError::InvalidEndpoint("endpoint is empty".into()));
        }
        Ok(Self {
            base_url,
            access_token: access_token.into(),
            token_type: constants::DEFAULT_TOKEN_TYPE.to_string(),
        })
    }

    /// Override the token type (defaults to `Bearer`).
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Build a credential from server configuration.
    pub fn from_config(config: &ServerConfig) -> CfsResult<Self> {
        if config.access_token.trim().is_empty() {
            return Err(CfsError::MissingConfig("server.access_token".into()));
        }
        let credential = Self::new(&config.endpoint, config.access_token.trim())?;
        if config.token_type.trim().is_empty() {
            Ok(credential)
        } else {
            Ok(credential.with_token_type(config.token_type.trim()))
        }
    }

    /// Normalized origin, e.g. `https://abc123.cloudfs.io`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Value of the `Authorization` header.
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("base_url", &self.base_url)
            .field("token_type", &self.token_type)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_endpoint() {
        let cred = Credential::new("abc.cloudfs.io/", "tok").unwrap();
        assert_eq!(cred.base_url(), "https://abc.cloudfs.io");
        assert_eq!(cred.authorization_value(), "Bearer tok");
    }

    #[test]
    fn test_blank_endpoint_is_invalid() {
        let err = Credential::new("  ", "tok").unwrap_err();
        assert!(matches!(err, CfsError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_config_requires_token() {
        let config = ServerConfig {
            endpoint: "abc.cloudfs.io".into(),
            ..ServerConfig::default()
        };
        let err = Credential::from_config(&config).unwrap_err();
        assert!(matches!(err, CfsError::MissingConfig(_)));
    }

    #[test]
    fn test_from_config_uses_token_type() {
        let config = ServerConfig {
            endpoint: "http://127.0.0.1:9000".into(),
            access_token: "tok".into(),
            token_type: "Token".into(),
            ..ServerConfig::default()
        };
        let cred = Credential::from_config(&config).unwrap();
        assert_eq!(cred.base_url(), "http://127.0.0.1:9000");
        assert_eq!(cred.authorization_value(), "Token tok");
    }

    #[test]
    fn test_debug_hides_token() {
        let cred = Credential::new("abc.cloudfs.io", "very-secret").unwrap();
        assert!(!format!("{cred:?}").contains("very-secret"));
    }
}
