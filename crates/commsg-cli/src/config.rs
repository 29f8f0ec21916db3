//! Config file loading and command-line overrides.

use anyhow::{Context, bail};
use commsg_client::ClientConfig;
use std::io::ErrorKind;
use std::path::Path;

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub project_key: Option<String>,
    pub servers: Vec<String>,
    pub token: Option<String>,
    pub request_code: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Read `path` (if it exists) and apply `overrides` on top.
///
/// A missing file is only accepted when the overrides alone name a project
/// key and at least one server.
pub fn load(path: &Path, overrides: Overrides) -> anyhow::Result<ClientConfig> {
    let config = match std::fs::read_to_string(path) {
        Ok(text) => parse(&text).with_context(|| format!("invalid config {}", path.display()))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if overrides.project_key.is_none() || overrides.servers.is_empty() {
                bail!(
                    "config file {} not found; pass --project-key and --server instead",
                    path.display()
                );
            }
            ClientConfig::new(String::new(), Vec::new())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    Ok(apply(config, overrides))
}

pub fn parse(text: &str) -> anyhow::Result<ClientConfig> {
    Ok(toml::from_str(text)?)
}

fn apply(mut config: ClientConfig, overrides: Overrides) -> ClientConfig {
    if let Some(key) = overrides.project_key {
        config.project_key = key;
    }
    if !overrides.servers.is_empty() {
        config.servers = overrides.servers;
    }
    if let Some(token) = overrides.token {
        config.token = token;
    }
    if let Some(code) = overrides.request_code {
        config.request_code = code;
    }
    if let Some(secs) = overrides.timeout_secs {
        config.timeout_secs = secs;
    }
    config
}
