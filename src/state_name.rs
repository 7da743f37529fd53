//! Names of registered states.
//!
//! A builder stores its states in a map keyed by `StateName` and copies
//! names into errors and build requests. The name is a shared `Arc<str>`,
//! so those copies never reallocate the text.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::sync::Arc;

/// Name a state is registered and applied under.
///
/// Compares, hashes and orders like the underlying string, and serializes
/// as a plain JSON string.
///
/// # Examples
///
/// ```rust
/// use dashing::StateName;
///
/// let defeated = StateName::new("defeated");
/// let same: StateName = "defeated".into();
/// let owned: StateName = String::from("defeated").into();
///
/// assert_eq!(defeated, same);
/// assert_eq!(defeated, owned);
/// assert_eq!(defeated.to_string(), "defeated");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct StateName(Arc<str>);

impl StateName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StateName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&StateName> for StateName {
    fn from(name: &StateName) -> Self {
        name.clone()
    }
}

impl From<StateName> for String {
    fn from(name: StateName) -> Self {
        name.0.to_string()
    }
}

impl AsRef<str> for StateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// `HashMap<StateName, _>::get` takes a plain `&str`.
impl Borrow<str> for StateName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
