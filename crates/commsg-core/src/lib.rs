//! Core types for the commsg message-center SDK.
//!
//! This crate owns everything that does not touch the network: request
//! parameter assembly, form encoding, and the rules that turn a response
//! body into an [`ApiResult`]. The HTTP side lives in `commsg-client`.

pub mod form;
mod message;
mod project_key;
mod request;
mod result;

pub use message::{MessageBody, MsgType, ReadFilter};
pub use project_key::{ConfigError, PROJECT_KEY_LEN, ProjectKey};
pub use request::{DEFAULT_PAGE_SIZE, DEFAULT_SOURCE, Detail, PageQuery, PushRequest, SetRead};
pub use result::{
    ApiResult, Envelope, MISSING_FIELDS_MSG, SUCCESS_CODE, SendError, WRONG_TYPE_MSG,
};

/// Request parameters: a JSON object, flattened by [`form::encode`] on the wire.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Header carrying the auth token.
pub const TOKEN_HEADER: &str = "token";

/// Header carrying the correlation code, and the context key it is read from.
pub const REQUEST_CODE_HEADER: &str = "request-code";

/// Message-center endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Server-side push.
    Push,
    /// Message listing.
    Page,
    /// Mark messages read.
    SetRead,
    /// Single message detail.
    Detail,
    /// Contact list.
    Contacts,
    /// Per-contact message statistics.
    ContactStatistics,
}

impl Endpoint {
    /// Request path, appended to the chosen server.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Push => "/wsClient/push",
            Endpoint::Page => "/im-msg/page",
            Endpoint::SetRead => "/im-msg/setRead",
            Endpoint::Detail => "/im-msg/details",
            Endpoint::Contacts => "/im-contact/list",
            Endpoint::ContactStatistics => "/im-contact/msgStatistics",
        }
    }
}
