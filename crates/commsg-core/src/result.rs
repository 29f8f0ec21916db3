//! Call outcomes.
//!
//! Every remote call ends in exactly one [`ApiResult`]. Transport failures,
//! malformed bodies and incomplete envelopes are all folded into a failed
//! result here, so nothing past the client boundary has to handle errors for
//! an individual call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The code the server uses for success. Any other code is a failure.
pub const SUCCESS_CODE: &str = "00000";

pub const WRONG_TYPE_MSG: &str = "returned data has wrong type";
pub const MISSING_FIELDS_MSG: &str = "api result missing code/data/msg";

/// Outcome of a single call against the message center.
///
/// Serializes as `{"status", "msg", "data", "code"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResult {
    status: bool,
    msg: String,
    data: Value,
    code: String,
}

impl ApiResult {
    fn new(status: bool, msg: impl Into<String>, data: Value, code: impl Into<String>) -> Self {
        let msg = msg.into();
        let msg = if msg.is_empty() {
            (if status { "success" } else { "failed" }).to_string()
        } else {
            msg
        };
        Self {
            status,
            msg,
            data,
            code: code.into(),
        }
    }

    fn failed(msg: impl Into<String>) -> Self {
        Self::new(false, msg, empty_data(), "")
    }

    /// Interpret a response body.
    pub fn from_body(body: &str) -> Self {
        match Envelope::parse(body) {
            Ok(envelope) => envelope.into_result(),
            Err(err) => err.into(),
        }
    }

    /// True only when the server answered with [`SUCCESS_CODE`].
    pub fn is_success(&self) -> bool {
        self.status
    }

    /// Server message, or the reason the call failed locally.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Payload; an empty array when the call failed before a reply.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Take the payload.
    pub fn into_data(self) -> Value {
        self.data
    }

    /// Service status code; empty when the call never got a well-formed reply.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Plain mapping form of the result.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("status".into(), self.status.into());
        map.insert("msg".into(), self.msg.clone().into());
        map.insert("data".into(), self.data.clone());
        map.insert("code".into(), self.code.clone().into());
        map
    }
}

fn empty_data() -> Value {
    Value::Array(Vec::new())
}

/// Why a call produced no usable envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// Connection, timeout, HTTP status or body read failure.
    #[error("{0}")]
    Transport(String),
    /// Body is not JSON, not an object, or has fields of the wrong type.
    #[error("{}", WRONG_TYPE_MSG)]
    WrongType,
    /// One of `code`, `data`, `msg` is missing or null.
    #[error("{}", MISSING_FIELDS_MSG)]
    MissingFields,
}

impl From<SendError> for ApiResult {
    fn from(err: SendError) -> Self {
        ApiResult::failed(err.to_string())
    }
}

/// The `{code, data, msg}` wrapper around every server reply.
///
/// Fields are optional so a missing one can be told apart from a reply
/// that is not an envelope at all.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    code: Option<Scalar>,
    data: Option<Value>,
    msg: Option<Scalar>,
}

impl Envelope {
    pub fn parse(body: &str) -> Result<Self, SendError> {
        let object: Map<String, Value> =
            serde_json::from_str(body).map_err(|_| SendError::WrongType)?;
        Envelope::deserialize(Value::Object(object)).map_err(|_| SendError::WrongType)
    }

    pub fn into_result(self) -> ApiResult {
        match (self.code, self.data, self.msg) {
            (Some(code), Some(data), Some(msg)) => {
                let code = code.into_string();
                ApiResult::new(code == SUCCESS_CODE, msg.into_string(), data, code)
            }
            _ => SendError::MissingFields.into(),
        }
    }
}

/// A JSON scalar accepted where the server should send a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Num(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Num(n) => n.to_string(),
            Scalar::Bool(true) => "1".to_string(),
            Scalar::Bool(false) => String::new(),
        }
    }
}
