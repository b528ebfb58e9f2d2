use std::collections::HashMap;

use super::read::ReadApi;
use crate::LookupError;

/// In-memory read capability mapping attribute keys to values.
///
/// Keys that were never set read as absent. A key can also be marked
/// unavailable, in which case looking it up fails with
/// [`LookupError::Unavailable`]; this is how a request context models a
/// backing service that could not be reached.
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, ContextValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ContextValue {
    Present(String),
    Absent,
    Unavailable(String),
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`.
    #[must_use]
    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Mark `key` as explicitly absent.
    #[must_use]
    pub fn set_absent(mut self, key: &str) -> Self {
        self.data.insert(key.to_owned(), ContextValue::Absent);
        self
    }

    /// Make lookups of `key` fail with the given reason.
    #[must_use]
    pub fn set_unavailable(mut self, key: &str, reason: impl Into<String>) -> Self {
        self.data
            .insert(key.to_owned(), ContextValue::Unavailable(reason.into()));
        self
    }

    /// Bind `key` to `value` (mutable reference version).
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.data
            .insert(key.to_owned(), ContextValue::Present(value.into()));
    }

    /// Forget anything known about `key`. It reads as absent afterwards.
    pub fn remove(&mut self, key: &str) {
        self.data.remove(key);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ReadApi for Context {
    type Error = LookupError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match self.data.get(key) {
            Some(ContextValue::Present(value)) => Ok(Some(value.clone())),
            Some(ContextValue::Absent) | None => Ok(None),
            Some(ContextValue::Unavailable(reason)) => Err(LookupError::Unavailable {
                key: key.to_owned(),
                reason: reason.clone(),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let data = iter
            .into_iter()
            .map(|(k, v)| (k.into(), ContextValue::Present(v.into())))
            .collect();
        Self { data }
    }
}
