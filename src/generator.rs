//! Default data generator.
//!
//! Seed functions and `on_created` callbacks receive the builder's
//! generator by reference. Builders never read it themselves, so any
//! `G` works: a random source, a fixture registry, a plain struct.
//! `Capabilities` is what you get when you do not pick one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Named values handed to seed functions and callbacks.
///
/// Keys are kept sorted so `Debug` output is stable between runs.
///
/// # Examples
///
/// ```rust
/// use dashing::Capabilities;
///
/// let generator = Capabilities::new()
///     .with("city", "gotham")
///     .with("max_age", 99);
///
/// assert_eq!(generator.get::<String>("city").as_deref(), Some("gotham"));
/// assert_eq!(generator.get::<u8>("max_age"), Some(99));
/// assert_eq!(generator.get::<u8>("city"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    entries: BTreeMap<String, Value>,
}

impl Capabilities {
    /// An empty generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining form of [`Capabilities::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Store `value` under `key`, returning what was there before.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Read `key` as `T`. `None` when absent or of another shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        T::deserialize(value).ok()
    }

    /// The stored JSON value for `key`.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_empty() {
        let generator = Capabilities::default();
        assert!(generator.is_empty());
        assert_eq!(generator.get::<String>("anything"), None);
        assert_eq!(generator.raw("anything"), None);
    }

    #[test]
    fn test_set_returns_previous() {
        let mut generator = Capabilities::new();
        assert_eq!(generator.set("names", vec!["bruce", "dick"]), None);

        let names: Option<Vec<String>> = generator.get("names");
        assert_eq!(names, Some(vec!["bruce".to_string(), "dick".to_string()]));

        let previous = generator.set("names", "alfred");
        assert_eq!(previous, Some(json!(["bruce", "dick"])));
        assert_eq!(generator.raw("names"), Some(&json!("alfred")));
        assert_eq!(generator.len(), 1);
    }

    #[test]
    fn test_wrong_shape_is_none() {
        let generator = Capabilities::new().with("seed", "not a number");
        assert!(generator.contains_key("seed"));
        assert_eq!(generator.get::<u64>("seed"), None);
    }

    #[test]
    fn test_keys_are_sorted() {
        let generator = Capabilities::new()
            .with("zone", "gotham")
            .with("age", 30)
            .with("mask", true);
        assert_eq!(generator.keys().collect::<Vec<_>>(), vec!["age", "mask", "zone"]);
    }
}
