//! Document-level style hooks.
//!
//! Preferences reach plain style rules through `data-*` attributes on the
//! root element (`[data-motion="off"] * { animation: none }`).

use std::collections::BTreeMap;
use std::sync::Mutex;

/// Sink for root-element attributes.
pub trait StyleHooks: Send + Sync {
    fn set_attribute(&self, name: &str, value: &str);
}

/// Collects attributes to render on the server-side `<html>` element.
#[derive(Debug, Default)]
pub struct RootAttributes {
    attributes: Mutex<BTreeMap<String, String>>,
}

impl RootAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.attributes.lock().ok()?.get(name).cloned()
    }

    /// ` name="value"` pairs in name order, ready to splice into a tag.
    pub fn render(&self) -> String {
        let Ok(attributes) = self.attributes.lock() else {
            return String::new();
        };
        attributes
            .iter()
            .map(|(name, value)| format!(" {}=\"{}\"", name, value))
            .collect()
    }
}

impl StyleHooks for RootAttributes {
    fn set_attribute(&self, name: &str, value: &str) {
        if let Ok(mut attributes) = self.attributes.lock() {
            attributes.insert(name.to_string(), value.to_string());
        }
    }
}
