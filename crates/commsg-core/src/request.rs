//! Endpoint request builders.
//!
//! Each builder turns typed arguments into the flat parameter mapping the
//! server expects. Unset optionals are left out of the mapping entirely
//! rather than sent as empty values.

use crate::{MessageBody, MsgType, Params, ProjectKey, ReadFilter};
use serde_json::{Map, Value};

/// Default page size for message listing.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default `source` for pushed messages.
pub const DEFAULT_SOURCE: &str = "sys";

/// Server-side push of a message to one or more IM accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct PushRequest {
    pub sender: String,
    pub recipients: Vec<String>,
    pub body: MessageBody,
    pub custom_type: String,
    pub custom_data: Map<String, Value>,
    pub msg_type: MsgType,
    pub source: String,
    /// Sender's IM password; the server falls back to its default when empty.
    pub sender_password: String,
    /// Applied last, overriding any key set above.
    pub extra: Params,
}

impl PushRequest {
    pub fn new(
        sender: impl Into<String>,
        recipients: impl IntoIterator<Item = impl Into<String>>,
        body: impl Into<MessageBody>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipients: recipients.into_iter().map(Into::into).collect(),
            body: body.into(),
            custom_type: String::new(),
            custom_data: Map::new(),
            msg_type: MsgType::default(),
            source: DEFAULT_SOURCE.to_string(),
            sender_password: String::new(),
            extra: Params::new(),
        }
    }

    /// Caller-defined category, opaque to the server.
    pub fn custom_type(mut self, custom_type: impl Into<String>) -> Self {
        self.custom_type = custom_type.into();
        self
    }

    /// Arbitrary data delivered alongside the body.
    pub fn custom_data(mut self, data: Map<String, Value>) -> Self {
        self.custom_data = data;
        self
    }

    pub fn msg_type(mut self, msg_type: MsgType) -> Self {
        self.msg_type = msg_type;
        self
    }

    /// Origin tag; defaults to [`DEFAULT_SOURCE`].
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn sender_password(mut self, password: impl Into<String>) -> Self {
        self.sender_password = password.into();
        self
    }

    /// Raw parameters merged over the generated ones.
    pub fn extra(mut self, extra: Params) -> Self {
        self.extra = extra;
        self
    }

    /// Wire parameters for `/wsClient/push`.
    pub fn into_params(self, project_key: &ProjectKey) -> Params {
        let mut params = Params::new();
        params.insert("to".into(), Value::from(dedup(self.recipients)));
        params.insert("projectKey".into(), project_key.as_str().into());
        params.insert("sendUsrName".into(), self.sender.into());
        params.insert("msgType".into(), self.msg_type.code().into());
        params.insert("customType".into(), self.custom_type.into());
        params.insert("source".into(), self.source.into());
        params.insert("msgBody".into(), body_value(self.body));
        params.insert("customData".into(), Value::Object(self.custom_data));
        params.insert("sendUsrPwd".into(), self.sender_password.into());
        merge(&mut params, self.extra);
        params
    }
}

/// Cursor-based message listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    /// Id of the last message already seen; `0` starts from the newest.
    pub last_id: u64,
    pub friend_account: Option<String>,
    pub custom_type: Option<String>,
    pub msg_type: Option<MsgType>,
    pub read: ReadFilter,
    pub page_size: u32,
    pub extra: Params,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PageQuery {
    pub fn new(last_id: u64) -> Self {
        Self {
            last_id,
            friend_account: None,
            custom_type: None,
            msg_type: None,
            read: ReadFilter::Any,
            page_size: DEFAULT_PAGE_SIZE,
            extra: Params::new(),
        }
    }

    /// Only messages exchanged with this account.
    pub fn friend(mut self, account: impl Into<String>) -> Self {
        self.friend_account = Some(account.into());
        self
    }

    /// Only messages with this custom type.
    pub fn custom_type(mut self, custom_type: impl Into<String>) -> Self {
        self.custom_type = Some(custom_type.into());
        self
    }

    /// Only messages of this type.
    pub fn msg_type(mut self, msg_type: MsgType) -> Self {
        self.msg_type = Some(msg_type);
        self
    }

    pub fn read(mut self, read: ReadFilter) -> Self {
        self.read = read;
        self
    }

    /// Messages per page; defaults to [`DEFAULT_PAGE_SIZE`].
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Raw parameters merged over the generated ones.
    pub fn extra(mut self, extra: Params) -> Self {
        self.extra = extra;
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new();
        params.insert("lastId".into(), self.last_id.into());
        if let Some(friend) = self.friend_account.filter(|s| !s.is_empty()) {
            params.insert("friendAccount".into(), friend.into());
        }
        if let Some(custom_type) = self.custom_type.filter(|s| !s.is_empty()) {
            params.insert("customType".into(), custom_type.into());
        }
        if let Some(msg_type) = self.msg_type {
            params.insert("msgType".into(), msg_type.code().into());
        }
        if let Some(read) = self.read.wire_value() {
            params.insert("isRead".into(), read.into());
        }
        params.insert("pageSize".into(), self.page_size.into());
        merge(&mut params, self.extra);
        params
    }
}

/// Mark messages as read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetRead {
    /// Message ids to mark. Empty means every message for the caller.
    pub ids: Vec<u64>,
}

impl SetRead {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new();
        if !self.ids.is_empty() {
            params.insert("ids".into(), Value::from(self.ids));
        }
        params
    }
}

/// Fetch one message (sent or received by the caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detail {
    pub id: u64,
}

impl Detail {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new();
        params.insert("id".into(), self.id.into());
        params
    }
}

/// Remove duplicate recipients, keeping first occurrences in order.
fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn body_value(body: MessageBody) -> Value {
    let mut map = Map::new();
    map.insert("content".into(), body.content.into());
    map.extend(body.extra);
    Value::Object(map)
}

fn merge(params: &mut Params, extra: Params) {
    for (key, value) in extra {
        params.insert(key, value);
    }
}
