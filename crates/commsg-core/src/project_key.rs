//! Project keys.
//!
//! Every tenant of the message center is identified by a fixed-width key of
//! exactly [`PROJECT_KEY_LEN`] bytes. The key is validated once, when the
//! client is built; afterwards it is an opaque string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Required length of a project key, in bytes.
pub const PROJECT_KEY_LEN: usize = 20;

/// A validated 20-byte project key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Validate and wrap a project key.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        let len = key.len();
        if len != PROJECT_KEY_LEN {
            return Err(ConfigError::InvalidProjectKey { len });
        }
        Ok(Self(key))
    }

    /// The key as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProjectKey {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ProjectKey> for String {
    fn from(key: ProjectKey) -> Self {
        key.0
    }
}

/// Construction-time configuration failure.
///
/// These are the only errors the SDK surfaces as `Err`; everything that can
/// go wrong during a call is folded into a failed [`crate::ApiResult`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("project key must be exactly {} bytes, got {len}", PROJECT_KEY_LEN)]
    InvalidProjectKey { len: usize },
    #[error("at least one server address is required")]
    NoServers,
    #[error("failed to build HTTP transport: {0}")]
    Transport(String),
    #[error("failed to start runtime: {0}")]
    Runtime(String),
}
