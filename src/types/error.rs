use thiserror::Error;

/// A rule could not be built because the caller broke a construction contract.
///
/// This is a programming error on the caller's side and is never produced
/// during evaluation, so it cannot be mistaken for absent data or a failed
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    #[error("{rule} rule requires at least one key, got none")]
    MissingKey { rule: &'static str },

    #[error("{kind} rule requires at least one nested rule")]
    EmptyComposite { kind: &'static str },
}
