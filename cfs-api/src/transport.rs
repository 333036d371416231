//! Request execution.
//!
//! [`Transport`] is the seam between the request pipeline and the network.
//! [`HttpTransport`] implements it over reqwest with connection pooling
//! disabled, so every call opens and releases its own connection.

use std::fmt;
use std::io::{Cursor, Read};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method, StatusCode};
use tracing::debug;
use url::Url;

use cfs_core::config::ServerConfig;
use cfs_core::error::{CfsError, CfsResult};

/// HTTP verbs used by the CloudFS API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
    Head,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpVerb> for Method {
    fn from(verb: HttpVerb) -> Self {
        match verb {
            HttpVerb::Get => Method::GET,
            HttpVerb::Post => Method::POST,
            HttpVerb::Head => Method::HEAD,
        }
    }
}

/// A single API request, built per call and consumed by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub verb: HttpVerb,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    /// Form-encoded body, for mutations.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status code plus the body reader of a completed exchange.
///
/// The reader is released when the envelope (or the reader taken out of it)
/// is dropped.
pub struct ResponseEnvelope {
    status: StatusCode,
    body: Box<dyn Read + Send>,
}

impl ResponseEnvelope {
    pub fn new(status: StatusCode, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }

    /// Envelope over an in-memory body.
    pub fn from_bytes(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self::new(status, Cursor::new(body.into()))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn into_parts(self) -> (StatusCode, Box<dyn Read + Send>) {
        (self.status, self.body)
    }
}

impl fmt::Debug for ResponseEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseEnvelope")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Executes one request and returns its response envelope.
///
/// Implementations must not retry: a failure is reported once, as
/// `CfsError::Transport` or `CfsError::Timeout`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> CfsResult<ResponseEnvelope>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Build a transport from server configuration.
    pub fn new(config: &ServerConfig) -> CfsResult<Self> {
        let mut builder = Client::builder().pool_max_idle_per_host(0);

        if config.api_timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.api_timeout_ms));
        }

        // Handle self-signed certificates
        if config.accept_self_signed_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| CfsError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { inner })
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(inner: Client) -> Self {
        Self { inner }
    }

    /// Classify a reqwest error into a CfsError variant.
    fn classify_error(e: reqwest::Error) -> CfsError {
        if e.is_timeout() {
            CfsError::Timeout(e.to_string())
        } else if e.is_connect() {
            CfsError::Transport(format!("connection failed: {e}"))
        } else {
            CfsError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> CfsResult<ResponseEnvelope> {
        let ApiRequest {
            verb,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.inner.request(verb.into(), url);
        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(Self::classify_error)?;
        let status = response.status();

        // Consuming the response releases the connection on every path.
        let body = response.bytes().await.map_err(Self::classify_error)?;
        debug!("{verb} -> {status} ({} bytes)", body.len());

        Ok(ResponseEnvelope::from_bytes(status, body))
    }
}
