//! HTTP client for the CloudFS REST API.
//!
//! `ApiClient` pairs a credential with a transport and runs the shared
//! request pipeline: URL construction, header injection, execution, and
//! response classification. Endpoint methods in [`crate::endpoints`] parse
//! the classified body into their own result types.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use cfs_core::config::ServerConfig;
use cfs_core::error::CfsResult;
use cfs_core::Credential;

use crate::classify::classify;
use crate::headers::request_headers;
use crate::request_url::build_request_url;
use crate::response::ResponseBody;
use crate::transport::{ApiRequest, HttpTransport, HttpVerb, Transport};

/// Client for communicating with the CloudFS API.
///
/// Holds no mutable state: the credential is only borrowed by each call and
/// every call gets its own connection, so a client can be cloned and shared
/// across tasks freely.
#[derive(Clone)]
pub struct ApiClient {
    credential: Credential,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client over the reqwest transport.
    pub fn new(credential: Credential, config: &ServerConfig) -> CfsResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(credential, Arc::new(transport)))
    }

    /// Create a client from server configuration alone.
    pub fn from_config(config: &ServerConfig) -> CfsResult<Self> {
        let credential = Credential::from_config(config)?;
        Self::new(credential, config)
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(credential: Credential, transport: Arc<dyn Transport>) -> Self {
        Self {
            credential,
            transport,
        }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Run one request through the pipeline and classify the response.
    ///
    /// Exactly one round trip; failures are returned as-is.
    pub async fn send(
        &self,
        verb: HttpVerb,
        primary: &str,
        secondary: Option<&str>,
        params: &[(&str, &str)],
        body: Option<String>,
    ) -> CfsResult<ResponseBody> {
        let url = build_request_url(&self.credential, primary, secondary, params)?;
        let headers = request_headers(&self.credential, body.is_some());
        debug!("{} {}", verb, url.path());

        let request = ApiRequest {
            verb,
            url,
            headers,
            body,
        };
        let envelope = self.transport.execute(request).await?;
        classify(envelope)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}
