//! Global error types for the CloudFS client.
//!
//! Every failure an API call can produce is unified into a single `CfsError`
//! enum. Server-reported failures carry an [`ErrorDetail`] payload that is
//! shared between the `Server` and `Authentication` kinds.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience type alias for Results using CfsError.
pub type CfsResult<T> = Result<T, CfsError>;

/// Structured failure reported by the CloudFS server.
///
/// Carries the server's code and message unmodified. `data` holds any nested
/// detail object the server attached to the error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Numeric error code (server-specific, or the HTTP status).
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Optional nested detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorDetail {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attach nested detail to this error.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}: {}", self.code, self.message)
    }
}

/// Unified error type covering all error categories in the CloudFS client.
#[derive(Error, Debug)]
pub enum CfsError {
    // -- Configuration errors --
    /// Failed to load or parse client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Request construction --
    /// The request URL could not be built from the credential and segments.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    // -- Network errors --
    /// Connection or IO failure before or during the exchange.
    #[error("transport error: {0}")]
    Transport(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    // -- Server-classified errors --
    /// Server returned an error envelope or a non-success status.
    #[error("server error ({0})")]
    Server(ErrorDetail),

    /// Server rejected the credential (401/403).
    #[error("authentication failed ({0})")]
    Authentication(ErrorDetail),

    // -- Body errors --
    /// Response body did not match the expected JSON shape.
    #[error("parse error: {message}{}", position_suffix(.line, .column))]
    Parse {
        /// What went wrong.
        message: String,
        /// 1-based line of the failure, when known.
        line: Option<usize>,
        /// 1-based column of the failure, when known.
        column: Option<usize>,
        /// The offending JSON fragment, when known.
        fragment: Option<String>,
    },

    // -- File/IO errors --
    /// Local file system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn position_suffix(line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(l), Some(c)) => format!(" at line {l} column {c}"),
        _ => String::new(),
    }
}

impl CfsError {
    /// Build a parse error that points at an offending JSON fragment.
    pub fn parse_fragment(message: impl Into<String>, fragment: impl Into<String>) -> Self {
        CfsError::Parse {
            message: message.into(),
            line: None,
            column: None,
            fragment: Some(fragment.into()),
        }
    }

    /// The server payload, for either of the server-classified kinds.
    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            CfsError::Server(detail) | CfsError::Authentication(detail) => Some(detail),
            _ => None,
        }
    }

    /// Whether this error came from the network layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, CfsError::Transport(_) | CfsError::Timeout(_))
    }
}

impl From<serde_json::Error> for CfsError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line 0 for errors not tied to input position
        let positioned = e.line() > 0;
        CfsError::Parse {
            message: e.to_string(),
            line: positioned.then(|| e.line()),
            column: positioned.then(|| e.column()),
            fragment: None,
        }
    }
}

impl From<toml::de::Error> for CfsError {
    fn from(e: toml::de::Error) -> Self {
        CfsError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cfs_error_display() {
        let err = CfsError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn test_server_error_display_carries_code_and_message() {
        let err = CfsError::Server(ErrorDetail::new(409, "conflict"));
        assert_eq!(err.to_string(), "server error (code 409: conflict)");
    }

    #[test]
    fn test_detail_is_shared_between_kinds() {
        let detail = ErrorDetail::new(401, "token expired");
        let server = CfsError::Server(detail.clone());
        let auth = CfsError::Authentication(detail.clone());
        assert_eq!(server.detail(), Some(&detail));
        assert_eq!(auth.detail(), Some(&detail));
        assert!(CfsError::Transport("reset".into()).detail().is_none());
    }

    #[test]
    fn test_json_error_keeps_position() {
        let err: CfsError = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }")
            .unwrap_err()
            .into();
        match err {
            CfsError::Parse { line, column, .. } => {
                assert_eq!(line, Some(2));
                assert!(column.is_some());
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_is_transport() {
        assert!(CfsError::Timeout("30s".into()).is_transport());
        assert!(CfsError::Transport("refused".into()).is_transport());
        assert!(!CfsError::InvalidEndpoint("empty".into()).is_transport());
    }
}
