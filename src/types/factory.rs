use super::equals::Equals;
use super::error::ConstructError;
use super::literal::EqualsLiteral;
use super::rule::Rule;

/// Builds leaf rules from the keys an outer rule-set parser derived from a
/// definition.
///
/// Object safe, so a builder can keep a `Box<dyn RuleFactory<A>>` per
/// definition kind.
pub trait RuleFactory<A> {
    /// # Errors
    ///
    /// Returns [`ConstructError`] if `keys` does not fit this kind of rule.
    fn try_new_rule(&self, keys: Vec<String>, attributes: A) -> Result<Rule<A>, ConstructError>;

    /// # Panics
    ///
    /// Panics if `keys` does not fit this kind of rule. Malformed keys are a
    /// bug in the caller, not missing data.
    fn new_rule(&self, keys: Vec<String>, attributes: A) -> Rule<A> {
        match self.try_new_rule(keys, attributes) {
            Ok(rule) => rule,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Produces [`EqualsLiteral`] rules comparing the first key to a fixed literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualsLiteralFactory {
    literal: Option<String>,
}

impl EqualsLiteralFactory {
    /// `None` builds rules that require the key to be absent.
    #[must_use]
    pub fn new(literal: Option<String>) -> Self {
        Self { literal }
    }

    #[must_use]
    pub fn value(literal: impl Into<String>) -> Self {
        Self::new(Some(literal.into()))
    }

    #[must_use]
    pub fn absent() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }
}

impl<A> RuleFactory<A> for EqualsLiteralFactory {
    /// Uses `keys[0]`; any further keys are ignored.
    fn try_new_rule(&self, keys: Vec<String>, attributes: A) -> Result<Rule<A>, ConstructError> {
        let key = keys.into_iter().next().ok_or(ConstructError::MissingKey {
            rule: "equals-literal",
        })?;
        Ok(EqualsLiteral::new(key, self.literal.clone(), attributes).into())
    }
}

/// Produces [`Equals`] rules over all the given keys. No keys gives a
/// universal rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EqualsFactory;

impl EqualsFactory {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<A> RuleFactory<A> for EqualsFactory {
    fn try_new_rule(&self, keys: Vec<String>, attributes: A) -> Result<Rule<A>, ConstructError> {
        Ok(Equals::new(keys, attributes).into())
    }
}
