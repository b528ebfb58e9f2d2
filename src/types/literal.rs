use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Leaf rule: one key must equal a fixed literal.
///
/// A `None` literal means the key must be absent. Absent and present never
/// match each other, whatever the present value is.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EqualsLiteral<A> {
    key: String,
    literal: Option<String>,
    attributes: A,
}

impl<A> EqualsLiteral<A> {
    pub fn new<L: Into<String>>(key: impl Into<String>, literal: Option<L>, attributes: A) -> Self {
        Self {
            key: key.into(),
            literal: literal.map(Into::into),
            attributes,
        }
    }

    /// Rule requiring `key` to be absent.
    pub fn absent(key: impl Into<String>, attributes: A) -> Self {
        Self::new(key, None::<String>, attributes)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    #[must_use]
    pub fn attributes(&self) -> &A {
        &self.attributes
    }

    #[must_use]
    pub fn key_match(&self, key: &str) -> bool {
        self.key == key
    }

    #[must_use]
    pub fn satisfiable(&self, key: &str, value: Option<&str>) -> bool {
        self.key_match(key) && value == self.literal()
    }
}

impl<A> fmt::Display for EqualsLiteral<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "({} == \"{literal}\")", self.key),
            None => write!(f, "({} is absent)", self.key),
        }
    }
}
