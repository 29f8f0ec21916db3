//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything needed to build a [`Client`](crate::Client).
///
/// Deserializable so it can live in a config file:
///
/// ```toml
/// project_key = "abcdefghij0123456789"
/// servers = ["10.0.0.1:9501", "https://msg.example.com"]
/// token = "secret"
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub project_key: String,
    pub servers: Vec<String>,
    #[serde(default)]
    pub token: String,
    /// Fixed correlation code; usually injected per request instead.
    #[serde(default)]
    pub request_code: String,
    /// `0` disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    pub fn new(project_key: impl Into<String>, servers: Vec<String>) -> Self {
        Self {
            project_key: project_key.into(),
            servers,
            token: String::new(),
            request_code: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
