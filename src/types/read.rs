use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::BuildHasher;
use std::sync::Arc;

/// Read access to the attribute values a rule is evaluated against.
///
/// A lookup has three outcomes, and rules treat each one differently:
///
/// - `Ok(Some(value))`: the key is bound to `value`.
/// - `Ok(None)`: the key is explicitly absent. Two absent keys compare equal.
/// - `Err(error)`: the lookup itself could not be completed. Evaluation stops
///   and the error is returned to the caller unchanged.
///
/// Implementations may block on I/O. Rules impose no timeout or retry policy
/// of their own.
pub trait ReadApi {
    type Error;

    /// Resolve the current value of `key`.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the value could not be resolved.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;
}

impl<T: ReadApi + ?Sized> ReadApi for &T {
    type Error = T::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }
}

impl<T: ReadApi + ?Sized> ReadApi for Box<T> {
    type Error = T::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }
}

impl<T: ReadApi + ?Sized> ReadApi for Arc<T> {
    type Error = T::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }
}

/// Keys missing from the map read as absent. Never fails.
impl<S: BuildHasher> ReadApi for HashMap<String, String, S> {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(HashMap::get(self, key).cloned())
    }
}

/// Read capability backed by a closure. Created by [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnReadApi<F>(F);

impl<F> std::fmt::Debug for FnReadApi<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnReadApi").finish_non_exhaustive()
    }
}

impl<F, E> ReadApi for FnReadApi<F>
where
    F: Fn(&str) -> Result<Option<String>, E>,
{
    type Error = E;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (self.0)(key)
    }
}

/// Wrap a lookup closure as a [`ReadApi`].
///
/// ```
/// use static_rules::{from_fn, EqualsLiteral, Rule};
///
/// let api = from_fn(|key: &str| -> Result<Option<String>, String> {
///     match key {
///         "plan" => Ok(Some("pro".to_owned())),
///         _ => Ok(None),
///     }
/// });
/// let rule: Rule<()> = EqualsLiteral::new("plan", Some("pro"), ()).into();
/// assert_eq!(rule.satisfied(&api), Ok(true));
/// ```
pub fn from_fn<F, E>(f: F) -> FnReadApi<F>
where
    F: Fn(&str) -> Result<Option<String>, E>,
{
    FnReadApi(f)
}
