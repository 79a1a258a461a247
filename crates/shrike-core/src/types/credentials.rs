//! Opaque provider credentials.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque key-value credential mapping supplied by the host application.
///
/// Providers read the fields they need by name and nothing is checked up
/// front: invalid credentials only surface when a remote call fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(HashMap<String, String>);

impl Credentials {
    /// Create an empty credential mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a credential field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a credential field, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Whether any fields are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of credential fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<HashMap<String, String>> for Credentials {
    fn from(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }
}

impl<K, V> FromIterator<(K, V)> for Credentials
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
