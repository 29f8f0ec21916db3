//! Ambient request context.
//!
//! Services that propagate a per-request trace id hand the client a
//! [`ContextProvider`]; the client reads [`REQUEST_CODE_HEADER`] from it once
//! at construction.

use commsg_core::REQUEST_CODE_HEADER;
use std::collections::{BTreeMap, HashMap};

/// Source of per-request context values.
pub trait ContextProvider {
    /// Value stored under `key`, or `default` when absent.
    fn get(&self, key: &str, default: &str) -> String;

    /// The correlation code for the current request, if any.
    fn request_code(&self) -> String {
        self.get(REQUEST_CODE_HEADER, "")
    }
}

impl ContextProvider for HashMap<String, String> {
    fn get(&self, key: &str, default: &str) -> String {
        HashMap::get(self, key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

impl ContextProvider for BTreeMap<String, String> {
    fn get(&self, key: &str, default: &str) -> String {
        BTreeMap::get(self, key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

impl<P: ContextProvider + ?Sized> ContextProvider for &P {
    fn get(&self, key: &str, default: &str) -> String {
        (**self).get(key, default)
    }
}
