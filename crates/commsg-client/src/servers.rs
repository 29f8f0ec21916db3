//! Server address selection.

use rand::seq::SliceRandom;
use std::borrow::Cow;

/// Non-empty list of message-center addresses, kept as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServerPool {
    addresses: Vec<String>,
}

impl ServerPool {
    /// `None` when `addresses` is empty.
    pub(crate) fn new(addresses: Vec<String>) -> Option<Self> {
        if addresses.is_empty() {
            None
        } else {
            Some(Self { addresses })
        }
    }

    pub(crate) fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// Pick an address uniformly at random, with a scheme.
    pub(crate) fn pick(&self) -> Cow<'_, str> {
        let address = self
            .addresses
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or_default();
        with_scheme(address)
    }
}

/// Prefix `http://` unless the address already names a scheme.
pub(crate) fn with_scheme(address: &str) -> Cow<'_, str> {
    if address.contains("http") {
        Cow::Borrowed(address)
    } else {
        Cow::Owned(format!("http://{address}"))
    }
}
