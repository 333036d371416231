//! CloudFS Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other CloudFS crates:
//! - Client configuration (endpoint, token, timeout, logging)
//! - The credential store used to authenticate every request
//! - The unified error type and server error payload
//! - Structured logging with tracing
//! - Platform directories and common constants

pub mod config;
pub mod constants;
pub mod credential;
pub mod error;
pub mod logging;
pub mod platform;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, ServerConfig};
pub use credential::Credential;
pub use error::{CfsError, CfsResult, ErrorDetail};
pub use logging::init_logging;
pub use platform::Platform;
