//! CloudFS API - HTTP client for the CloudFS REST API.
//!
//! This crate provides a typed client for the account, profile, and ping
//! endpoints. Every call runs the same pipeline:
//!
//! 1. [`build_request_url`] composes the versioned endpoint URL
//! 2. [`request_headers`] attaches the credential
//! 3. a [`Transport`] executes the request (one round trip, no retry)
//! 4. [`classify()`] separates success from server-reported errors
//! 5. [`parse()`] maps the success body onto [`Profile`] or [`GeneralResult`]

pub mod classify;
pub mod client;
pub mod endpoints;
pub mod headers;
pub mod models;
pub mod parse;
pub mod request_url;
pub mod response;
pub mod transport;

// Re-export key types
pub use classify::classify;
pub use client::ApiClient;
pub use headers::{form_body, request_headers};
pub use models::{Account, GeneralResult, Profile, User};
pub use parse::{
    decode_general, decode_profile, parse, parse_general, parse_profile, Parsed, ResultShape,
};
pub use request_url::build_request_url;
pub use response::ResponseBody;
pub use transport::{ApiRequest, HttpTransport, HttpVerb, ResponseEnvelope, Transport};
