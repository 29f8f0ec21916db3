//! The HTTP seam.
//!
//! [`Client`](crate::Client) is generic over [`Transport`] so the request it
//! would put on the wire can be inspected without a server.

use commsg_core::{ConfigError, REQUEST_CODE_HEADER, TOKEN_HEADER};
use std::future::Future;
use std::time::Duration;

/// A fully assembled form POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    /// Absolute URL, scheme included.
    pub url: String,
    pub token: String,
    pub request_code: String,
    /// Flattened form pairs, in order.
    pub form: Vec<(String, String)>,
}

/// Performs one POST and returns the response body as text.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        request: PostRequest,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("response body is not valid UTF-8: {0}")]
    Body(#[from] std::string::FromUtf8Error),
    #[error("request cancelled")]
    Cancelled,
    #[error("{0}")]
    Other(String),
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport; `None` disables the request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    /// Wrap an existing reqwest client (shared pools, proxies, custom TLS).
    pub fn from_reqwest(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    async fn post(&self, request: PostRequest) -> Result<String, TransportError> {
        let response = self
            .http
            .post(&request.url)
            .header(TOKEN_HEADER, &request.token)
            .header(REQUEST_CODE_HEADER, &request.request_code)
            .form(&request.form)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}
