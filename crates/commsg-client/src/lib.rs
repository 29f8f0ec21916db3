//! HTTP client for the commsg message center.
//!
//! ```no_run
//! use commsg_client::Client;
//! use commsg_core::PushRequest;
//!
//! # async fn demo() -> Result<(), commsg_core::ConfigError> {
//! let client = Client::new("abcdefghij0123456789", ["10.0.0.1:9501"], "token")?;
//! let result = client.push(PushRequest::new("system", ["alice", "bob"], "hello")).await;
//! if !result.is_success() {
//!     eprintln!("push failed: {}", result.message());
//! }
//! # Ok(())
//! # }
//! ```

pub mod blocking;
mod client;
mod config;
mod context;
mod servers;
mod transport;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_TIMEOUT_SECS};
pub use context::ContextProvider;
pub use transport::{HttpTransport, PostRequest, Transport, TransportError};

pub use commsg_core::{
    ApiResult, ConfigError, Detail, Endpoint, MessageBody, MsgType, PageQuery, Params,
    PushRequest, ReadFilter, SetRead,
};
pub use tokio_util::sync::CancellationToken;
