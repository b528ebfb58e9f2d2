use std::fmt;
use std::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::equals::Equals;
use super::error::ConstructError;
use super::literal::EqualsLiteral;
use super::read::ReadApi;
use super::report::EvaluationReport;

/// A matching condition over attribute keys.
///
/// Leaves are built by a [`RuleFactory`](super::RuleFactory) or directly from
/// [`EqualsLiteral`] / [`Equals`]; trees are composed with [`Rule::and`],
/// [`Rule::or`], [`Rule::all`], [`Rule::any`] and `!rule`. A rule never changes
/// after construction, so one tree can be evaluated from many threads at once.
///
/// `A` is an opaque payload handed back by [`Rule::attributes`].
///
/// # Example
///
/// ```
/// use static_rules::{Context, EqualsLiteral, Rule};
///
/// let rule: Rule<&str> = Rule::from(EqualsLiteral::new("region", Some("us"), "us-pro"))
///     .and(EqualsLiteral::new("tier", Some("gold"), "ignored").into());
///
/// let ctx = Context::new().set("region", "us").set("tier", "gold");
/// assert_eq!(rule.satisfied(&ctx), Ok(true));
/// assert_eq!(*rule.attributes(), "us-pro");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rule<A> {
    EqualsLiteral(EqualsLiteral<A>),
    Equals(Equals<A>),
    And(Composite<A>),
    Or(Composite<A>),
    Not(Box<Rule<A>>),
}

/// Non-empty, ordered list of nested rules shared by AND and OR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite<A> {
    rules: Vec<Rule<A>>,
}

impl<A> Composite<A> {
    /// # Errors
    ///
    /// Returns [`ConstructError::EmptyComposite`] if `rules` is empty.
    pub fn new(rules: Vec<Rule<A>>) -> Result<Self, ConstructError> {
        Self::with_kind(rules, "composite")
    }

    fn with_kind(rules: Vec<Rule<A>>, kind: &'static str) -> Result<Self, ConstructError> {
        if rules.is_empty() {
            return Err(ConstructError::EmptyComposite { kind });
        }
        Ok(Self { rules })
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule<A>] {
        &self.rules
    }

    /// Composites carry no payload of their own; the first child's is used.
    #[must_use]
    pub fn attributes(&self) -> &A {
        self.rules[0].attributes()
    }

    #[must_use]
    pub fn key_match(&self, key: &str) -> bool {
        self.rules.iter().any(|rule| rule.key_match(key))
    }

    /// True if any nested rule is satisfiable, for AND and OR alike.
    #[must_use]
    pub fn satisfiable(&self, key: &str, value: Option<&str>) -> bool {
        self.rules.iter().any(|rule| rule.satisfiable(key, value))
    }

    fn push(&mut self, rule: Rule<A>) {
        self.rules.push(rule);
    }
}

impl<A> Rule<A> {
    /// Conjunction of `rules`, evaluated in order.
    ///
    /// # Panics
    ///
    /// Panics if `rules` is empty. Use [`Rule::try_all`] to get an error instead.
    #[must_use]
    pub fn all(rules: Vec<Rule<A>>) -> Self {
        match Self::try_all(rules) {
            Ok(rule) => rule,
            Err(err) => panic!("{err}"),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConstructError::EmptyComposite`] if `rules` is empty.
    pub fn try_all(rules: Vec<Rule<A>>) -> Result<Self, ConstructError> {
        Composite::with_kind(rules, "AND").map(Rule::And)
    }

    /// Disjunction of `rules`, evaluated in order.
    ///
    /// # Panics
    ///
    /// Panics if `rules` is empty. Use [`Rule::try_any`] to get an error instead.
    #[must_use]
    pub fn any(rules: Vec<Rule<A>>) -> Self {
        match Self::try_any(rules) {
            Ok(rule) => rule,
            Err(err) => panic!("{err}"),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConstructError::EmptyComposite`] if `rules` is empty.
    pub fn try_any(rules: Vec<Rule<A>>) -> Result<Self, ConstructError> {
        Composite::with_kind(rules, "OR").map(Rule::Or)
    }

    /// `self AND other`. Extends `self` in place when it is already an AND.
    #[must_use]
    pub fn and(self, other: Rule<A>) -> Self {
        match self {
            Rule::And(mut composite) => {
                composite.push(other);
                Rule::And(composite)
            }
            rule => Rule::And(Composite {
                rules: vec![rule, other],
            }),
        }
    }

    /// `self OR other`. Extends `self` in place when it is already an OR.
    #[must_use]
    pub fn or(self, other: Rule<A>) -> Self {
        match self {
            Rule::Or(mut composite) => {
                composite.push(other);
                Rule::Or(composite)
            }
            rule => Rule::Or(Composite {
                rules: vec![rule, other],
            }),
        }
    }

    /// Whether this rule depends on `key`.
    #[must_use]
    pub fn key_match(&self, key: &str) -> bool {
        match self {
            Rule::EqualsLiteral(rule) => rule.key_match(key),
            Rule::Equals(rule) => rule.key_match(key),
            Rule::And(composite) | Rule::Or(composite) => composite.key_match(key),
            Rule::Not(nested) => nested.key_match(key),
        }
    }

    /// Cheap pre-check: could this rule hold if `key` had `value`?
    ///
    /// Never touches a read capability. A `false` answer is exact for a
    /// literal leaf; otherwise `true` means "possibly", never "certainly".
    /// A negation answers with the nested rule's [`key_match`](Self::key_match).
    #[must_use]
    pub fn satisfiable(&self, key: &str, value: Option<&str>) -> bool {
        match self {
            Rule::EqualsLiteral(rule) => rule.satisfiable(key, value),
            Rule::Equals(rule) => rule.satisfiable(key, value),
            Rule::And(composite) | Rule::Or(composite) => composite.satisfiable(key, value),
            Rule::Not(nested) => nested.key_match(key),
        }
    }

    /// Evaluate the rule against real data.
    ///
    /// Nested rules are evaluated left to right with short-circuiting, so
    /// lookups happen in a deterministic order.
    ///
    /// # Errors
    ///
    /// Returns the first lookup failure unchanged; evaluation stops there.
    pub fn satisfied<R: ReadApi + ?Sized>(&self, api: &R) -> Result<bool, R::Error> {
        crate::evaluate::satisfied(self, api)
    }

    /// Evaluate like [`satisfied`](Self::satisfied) and also report which keys
    /// were looked up and how long it took.
    ///
    /// # Errors
    ///
    /// Returns the first lookup failure unchanged.
    pub fn satisfied_detailed<R: ReadApi + ?Sized>(
        &self,
        api: &R,
    ) -> Result<EvaluationReport, R::Error> {
        crate::evaluate::satisfied_detailed(self, api)
    }

    /// The payload of this rule, or of the first leaf reached through the
    /// first child of each composite.
    #[must_use]
    pub fn attributes(&self) -> &A {
        match self {
            Rule::EqualsLiteral(rule) => rule.attributes(),
            Rule::Equals(rule) => rule.attributes(),
            Rule::And(composite) | Rule::Or(composite) => composite.attributes(),
            Rule::Not(nested) => nested.attributes(),
        }
    }

    /// Keys this rule reads, deduplicated, in first-seen order.
    #[must_use]
    pub fn referenced_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            Rule::EqualsLiteral(rule) => push_unique(keys, rule.key()),
            Rule::Equals(rule) => {
                for key in rule.keys() {
                    push_unique(keys, key);
                }
            }
            Rule::And(composite) | Rule::Or(composite) => {
                for rule in composite.rules() {
                    rule.collect_keys(keys);
                }
            }
            Rule::Not(nested) => nested.collect_keys(keys),
        }
    }

    /// Whether this is an equality leaf with no keys, which holds for any data.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        matches!(self, Rule::Equals(rule) if rule.is_universal())
    }
}

fn push_unique<'a>(keys: &mut Vec<&'a str>, key: &'a str) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

impl<A> Not for Rule<A> {
    type Output = Rule<A>;

    fn not(self) -> Rule<A> {
        Rule::Not(Box::new(self))
    }
}

impl<A> From<EqualsLiteral<A>> for Rule<A> {
    fn from(rule: EqualsLiteral<A>) -> Self {
        Rule::EqualsLiteral(rule)
    }
}

impl<A> From<Equals<A>> for Rule<A> {
    fn from(rule: Equals<A>) -> Self {
        Rule::Equals(rule)
    }
}

impl<A> fmt::Display for Rule<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::EqualsLiteral(rule) => write!(f, "{rule}"),
            Rule::Equals(rule) => write!(f, "{rule}"),
            Rule::And(composite) => write_joined(f, composite, " AND "),
            Rule::Or(composite) => write_joined(f, composite, " OR "),
            Rule::Not(nested) => write!(f, "(NOT {nested})"),
        }
    }
}

fn write_joined<A>(f: &mut fmt::Formatter<'_>, composite: &Composite<A>, sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, rule) in composite.rules().iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{rule}")?;
    }
    write!(f, ")")
}

#[cfg(feature = "serde")]
impl<A: Serialize> Serialize for Composite<A> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rules.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, A: Deserialize<'de>> Deserialize<'de> for Composite<A> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rules = Vec::<Rule<A>>::deserialize(deserializer)?;
        Composite::new(rules).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(key: &str, value: &str, attr: u32) -> Rule<u32> {
        EqualsLiteral::new(key, Some(value), attr).into()
    }

    fn eq(keys: &[&str], attr: u32) -> Rule<u32> {
        Equals::new(keys.iter().copied(), attr).into()
    }

    #[test]
    fn empty_composites_rejected() {
        assert_eq!(
            Rule::<()>::try_all(vec![]),
            Err(ConstructError::EmptyComposite { kind: "AND" })
        );
        assert_eq!(
            Rule::<()>::try_any(vec![]),
            Err(ConstructError::EmptyComposite { kind: "OR" })
        );
        assert!(Composite::<()>::new(vec![]).is_err());
    }

    #[test]
    #[should_panic(expected = "AND rule requires at least one nested rule")]
    fn all_panics_on_empty() {
        let _ = Rule::<()>::all(vec![]);
    }

    #[test]
    #[should_panic(expected = "OR rule requires at least one nested rule")]
    fn any_panics_on_empty() {
        let _ = Rule::<()>::any(vec![]);
    }

    #[test]
    fn composite_attributes_come_from_first_child() {
        let rule = Rule::all(vec![lit("a", "1", 10), lit("b", "2", 20)]);
        assert_eq!(*rule.attributes(), 10);

        let rule = Rule::any(vec![eq(&["x", "y"], 30), lit("a", "1", 40)]);
        assert_eq!(*rule.attributes(), 30);

        let nested = Rule::all(vec![
            Rule::any(vec![lit("a", "1", 1), lit("b", "2", 2)]),
            lit("c", "3", 3),
        ]);
        assert_eq!(*nested.attributes(), 1);
    }

    #[test]
    fn not_delegates_attributes() {
        let rule = !lit("a", "1", 5);
        assert_eq!(*rule.attributes(), 5);
    }

    #[test]
    fn composite_key_match_any_child() {
        let rule = lit("region", "us", 0).and(lit("tier", "gold", 0));
        assert!(rule.key_match("region"));
        assert!(rule.key_match("tier"));
        assert!(!rule.key_match("plan"));
    }

    #[test]
    fn and_satisfiable_is_any_child() {
        let rule = lit("region", "us", 0).and(lit("tier", "gold", 0));
        // A single relevant branch is enough, even for AND.
        assert!(rule.satisfiable("region", Some("us")));
        assert!(rule.satisfiable("tier", Some("gold")));
        assert!(!rule.satisfiable("region", Some("eu")));
        assert!(!rule.satisfiable("plan", Some("us")));
    }

    #[test]
    fn or_satisfiable_is_any_child() {
        let rule = lit("region", "us", 0).or(lit("region", "eu", 0));
        assert!(rule.satisfiable("region", Some("us")));
        assert!(rule.satisfiable("region", Some("eu")));
        assert!(!rule.satisfiable("region", Some("ap")));
    }

    #[test]
    fn not_satisfiable_uses_key_match() {
        let rule = !lit("plan", "pro", 0);
        assert!(rule.satisfiable("plan", Some("pro")));
        assert!(rule.satisfiable("plan", Some("free")));
        assert!(rule.satisfiable("plan", None));
        assert!(!rule.satisfiable("tier", Some("pro")));
        assert!(rule.key_match("plan"));
    }

    #[test]
    fn binary_and_or_flatten() {
        let rule = lit("a", "1", 0).and(lit("b", "2", 0)).and(lit("c", "3", 0));
        match &rule {
            Rule::And(composite) => assert_eq!(composite.rules().len(), 3),
            other => panic!("expected AND, got {other}"),
        }

        let rule = lit("a", "1", 0).or(lit("b", "2", 0)).or(lit("c", "3", 0));
        match &rule {
            Rule::Or(composite) => assert_eq!(composite.rules().len(), 3),
            other => panic!("expected OR, got {other}"),
        }

        let mixed = lit("a", "1", 0).and(lit("b", "2", 0)).or(lit("c", "3", 0));
        match &mixed {
            Rule::Or(composite) => assert_eq!(composite.rules().len(), 2),
            other => panic!("expected OR, got {other}"),
        }
    }

    #[test]
    fn referenced_keys_dedup_in_order() {
        let rule = Rule::all(vec![
            lit("region", "us", 0),
            !eq(&["a", "region", "b"], 0),
            lit("a", "x", 0).or(lit("tier", "gold", 0)),
        ]);
        assert_eq!(rule.referenced_keys(), vec!["region", "a", "b", "tier"]);
    }

    #[test]
    fn universal_detection() {
        assert!(eq(&[], 0).is_universal());
        assert!(!eq(&["a"], 0).is_universal());
        assert!(!lit("a", "1", 0).or(eq(&[], 0)).is_universal());
        assert!(!(!eq(&[], 0)).is_universal());
    }

    #[test]
    fn display_tree() {
        let rule = Rule::all(vec![
            lit("region", "us", 0),
            !eq(&["a", "b"], 0),
            lit("tier", "gold", 0).or(EqualsLiteral::absent("tier", 0).into()),
        ]);
        assert_eq!(
            rule.to_string(),
            "((region == \"us\") AND (NOT (a == b)) AND ((tier == \"gold\") OR (tier is absent)))"
        );
    }
}
