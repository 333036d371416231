//! Client-wide constants.

/// Application name.
pub const APP_NAME: &str = "CloudFS";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// REST API version path segment.
pub const API_VERSION: &str = "v2";

/// Default scheme used when a configured endpoint does not name one.
pub const DEFAULT_SCHEME: &str = "https";

/// Default token type for the `Authorization` header.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Default server API timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Longest JSON fragment carried by a parse error.
pub const MAX_ERROR_FRAGMENT_LEN: usize = 256;

/// Value of the `User-Agent` header sent with every request.
pub fn user_agent() -> String {
    format!("cloudfs-rust/{APP_VERSION}")
}

/// API method path segments.
pub mod methods {
    pub const USER: &str = "user";
    pub const PROFILE: &str = "profile";
    pub const PING: &str = "ping";
}

/// Content types used on the wire.
pub mod content_type {
    pub const JSON: &str = "application/json";
    pub const FORM: &str = "application/x-www-form-urlencoded";
}
