use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Leaf rule: every listed key resolves to the same value.
///
/// Keys that are all absent count as equal. An empty key list is universal:
/// it matches every key and is always satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equals<A> {
    keys: Vec<String>,
    attributes: A,
}

impl<A> Equals<A> {
    pub fn new<K: Into<String>>(keys: impl IntoIterator<Item = K>, attributes: A) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            attributes,
        }
    }

    /// The compared keys. The first one is the reference during evaluation.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn key_match(&self, key: &str) -> bool {
        self.is_universal() || self.keys.iter().any(|k| k == key)
    }

    /// Whether the rule depends on `key` at all. `value` is not consulted, so
    /// `true` only means the rule might hold.
    #[must_use]
    pub fn satisfiable(&self, key: &str, _value: Option<&str>) -> bool {
        self.key_match(key)
    }
}

impl<A> fmt::Display for Equals<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "(*)");
        }
        write!(f, "({})", self.keys.join(" == "))
    }
}
