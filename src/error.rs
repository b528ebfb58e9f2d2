use thiserror::Error;

/// Lookup failure reported by the bundled [`Context`](crate::Context) read capability.
///
/// Embedding systems with their own data source bring their own error type
/// through [`ReadApi::Error`](crate::ReadApi::Error); rules hand it back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("lookup of '{key}' failed: {reason}")]
    Unavailable { key: String, reason: String },
}
