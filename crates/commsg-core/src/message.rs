//! Message vocabulary shared by the push and listing endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// IM message type.
///
/// The server owns the meaning of these codes; the SDK only forwards them.
/// Codes it does not know by name travel as [`MsgType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MsgType {
    /// `M0000`: prompted and written to the message history.
    #[default]
    System,
    /// `M0001`: one-to-one chat, prompted and recorded.
    Direct,
    /// `M0002`: group chat, prompted and recorded.
    Group,
    /// `M0003`: silent front/back-end operation notice.
    Operation,
    /// `M9999`: client heartbeat.
    Heartbeat,
    /// Any other code, sent as given.
    Other(String),
}

impl MsgType {
    pub const KNOWN: [MsgType; 5] = [
        MsgType::System,
        MsgType::Direct,
        MsgType::Group,
        MsgType::Operation,
        MsgType::Heartbeat,
    ];

    /// The wire code, e.g. `"M0000"`.
    pub fn code(&self) -> &str {
        match self {
            MsgType::System => "M0000",
            MsgType::Direct => "M0001",
            MsgType::Group => "M0002",
            MsgType::Operation => "M0003",
            MsgType::Heartbeat => "M9999",
            MsgType::Other(code) => code,
        }
    }

    fn name(&self) -> Option<&'static str> {
        match self {
            MsgType::System => Some("system"),
            MsgType::Direct => Some("direct"),
            MsgType::Group => Some("group"),
            MsgType::Operation => Some("operation"),
            MsgType::Heartbeat => Some("heartbeat"),
            MsgType::Other(_) => None,
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MsgType {
    type Err = Infallible;

    /// Accepts the wire code (`M0001`) or the lowercase name (`direct`);
    /// anything else becomes [`MsgType::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let known = MsgType::KNOWN
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s) || t.name() == Some(lower.as_str()));
        Ok(known.unwrap_or_else(|| MsgType::Other(s.to_string())))
    }
}

impl From<String> for MsgType {
    fn from(code: String) -> Self {
        MsgType::KNOWN
            .into_iter()
            .find(|t| t.code() == code)
            .unwrap_or(MsgType::Other(code))
    }
}

impl From<&str> for MsgType {
    fn from(code: &str) -> Self {
        MsgType::from(code.to_string())
    }
}

impl From<MsgType> for String {
    fn from(msg_type: MsgType) -> Self {
        match msg_type {
            MsgType::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

/// Read-state filter for message listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFilter {
    /// No filter; the parameter is left out of the request.
    #[default]
    Any,
    Unread,
    Read,
}

impl ReadFilter {
    /// Wire value, or `None` when the filter should not be sent.
    pub fn wire_value(self) -> Option<u8> {
        match self {
            ReadFilter::Any => None,
            ReadFilter::Unread => Some(0),
            ReadFilter::Read => Some(1),
        }
    }
}

/// Body of a pushed message.
///
/// `content` is the only field the server requires; anything else the
/// caller's front end understands goes in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageBody {
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessageBody {
    /// A body carrying only text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra body field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl From<&str> for MessageBody {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for MessageBody {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msg_type_codes() {
        assert_eq!(MsgType::default().code(), "M0000");
        assert_eq!(MsgType::Heartbeat.to_string(), "M9999");
        assert_eq!(
            serde_json::to_value(MsgType::Group).unwrap(),
            Value::from("M0002")
        );
    }

    #[test]
    fn parse_msg_type() {
        assert_eq!("M0001".parse::<MsgType>().unwrap(), MsgType::Direct);
        assert_eq!("m0003".parse::<MsgType>().unwrap(), MsgType::Operation);
        assert_eq!("Heartbeat".parse::<MsgType>().unwrap(), MsgType::Heartbeat);
    }

    #[test]
    fn unknown_codes_pass_through() {
        let custom: MsgType = "M1234".parse().unwrap();
        assert_eq!(custom, MsgType::Other("M1234".to_string()));
        assert_eq!(custom.code(), "M1234");
        assert_eq!(serde_json::to_value(&custom).unwrap(), Value::from("M1234"));

        let decoded: MsgType = serde_json::from_str("\"M0002\"").unwrap();
        assert_eq!(decoded, MsgType::Group);
        let decoded: MsgType = serde_json::from_str("\"M7000\"").unwrap();
        assert_eq!(decoded, MsgType::from("M7000"));
    }

    #[test]
    fn read_filter_wire_values() {
        assert_eq!(ReadFilter::Any.wire_value(), None);
        assert_eq!(ReadFilter::Unread.wire_value(), Some(0));
        assert_eq!(ReadFilter::Read.wire_value(), Some(1));
    }

    #[test]
    fn body_flattens_extra_fields() {
        let body = MessageBody::new("hi").with("title", "greeting");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["content"], "hi");
        assert_eq!(value["title"], "greeting");
    }
}
