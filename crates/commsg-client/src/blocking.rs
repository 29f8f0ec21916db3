//! Synchronous client.
//!
//! Wraps the async [`Client`](crate::Client) in a private current-thread
//! runtime. Do not use it from inside another tokio runtime; `block_on` will
//! panic there.

use crate::config::ClientConfig;
use crate::context::ContextProvider;
use crate::transport::{HttpTransport, Transport};
use commsg_core::{ApiResult, ConfigError, Endpoint, PageQuery, Params, PushRequest, SetRead};
use tokio::runtime::Runtime;

/// Blocking message-center client.
pub struct Client<T = HttpTransport> {
    inner: crate::Client<T>,
    runtime: Runtime,
}

impl Client<HttpTransport> {
    /// See [`crate::Client::new`].
    pub fn new<S: Into<String>>(
        project_key: impl Into<String>,
        servers: impl IntoIterator<Item = S>,
        token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_async(crate::Client::new(project_key, servers, token)?)
    }

    /// See [`crate::Client::from_config`].
    pub fn from_config(config: ClientConfig) -> Result<Self, ConfigError> {
        Self::from_async(crate::Client::from_config(config)?)
    }
}

impl<T: Transport> Client<T> {
    /// Wrap an async client, starting the runtime it will block on.
    pub fn from_async(inner: crate::Client<T>) -> Result<Self, ConfigError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ConfigError::Runtime(e.to_string()))?;
        Ok(Self { inner, runtime })
    }

    /// Forward `code` as the `request-code` header on every call.
    pub fn with_correlation_code(self, code: impl Into<String>) -> Self {
        Self {
            inner: self.inner.with_correlation_code(code),
            runtime: self.runtime,
        }
    }

    /// Take the correlation code from `ctx`.
    pub fn with_context(self, ctx: &impl ContextProvider) -> Self {
        Self {
            inner: self.inner.with_context(ctx),
            runtime: self.runtime,
        }
    }

    /// The wrapped async client.
    pub fn inner(&self) -> &crate::Client<T> {
        &self.inner
    }

    /// Blocking [`crate::Client::send`].
    pub fn send(&self, path: &str, params: Params) -> ApiResult {
        self.runtime.block_on(self.inner.send(path, params))
    }

    /// Blocking [`crate::Client::call`].
    pub fn call(&self, endpoint: Endpoint, params: Params) -> ApiResult {
        self.runtime.block_on(self.inner.call(endpoint, params))
    }

    /// Push a message to IM accounts.
    pub fn push(&self, request: PushRequest) -> ApiResult {
        self.runtime.block_on(self.inner.push(request))
    }

    /// List messages after a cursor.
    pub fn page(&self, query: PageQuery) -> ApiResult {
        self.runtime.block_on(self.inner.page(query))
    }

    /// Mark messages read.
    pub fn set_read(&self, request: SetRead) -> ApiResult {
        self.runtime.block_on(self.inner.set_read(request))
    }

    /// Detail of one message.
    pub fn detail(&self, id: u64) -> ApiResult {
        self.runtime.block_on(self.inner.detail(id))
    }

    /// Contact list.
    pub fn contact_all(&self) -> ApiResult {
        self.runtime.block_on(self.inner.contact_all())
    }

    /// Contacts with their message counts.
    pub fn contact_msg_statistics(&self) -> ApiResult {
        self.runtime.block_on(self.inner.contact_msg_statistics())
    }
}
