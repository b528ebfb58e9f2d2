//! Static matching rules over named attribute keys.
//!
//! A [`Rule`] is a boolean condition built from two kinds of leaves,
//! [`EqualsLiteral`] (one key equals a fixed literal, or is absent) and
//! [`Equals`] (several keys resolve to the same value), composed with AND, OR
//! and NOT. Rules answer two questions:
//!
//! - [`Rule::satisfiable`]: could the rule hold if one key had one value?
//!   Cheap and data-free, meant for pre-filtering many rules by key.
//! - [`Rule::satisfied`]: does the rule hold for the data behind a
//!   [`ReadApi`]? Lookup failures are returned unchanged.
//!
//! ```
//! use static_rules::{Context, EqualsFactory, EqualsLiteralFactory, RuleFactory};
//!
//! let pro = EqualsLiteralFactory::value("pro").new_rule(vec!["plan".into()], "pro-plan");
//! let same_region = EqualsFactory.new_rule(vec!["region".into(), "home_region".into()], "home");
//! let rule = pro.and(!same_region);
//!
//! assert!(rule.satisfiable("plan", Some("pro")));
//! assert!(!rule.satisfiable("tier", Some("gold")));
//!
//! let ctx = Context::new()
//!     .set("plan", "pro")
//!     .set("region", "eu")
//!     .set("home_region", "us");
//! assert_eq!(rule.satisfied(&ctx), Ok(true));
//! assert_eq!(*rule.attributes(), "pro-plan");
//! ```

mod error;
mod evaluate;
mod types;

pub use error::LookupError;
pub use types::{
    from_fn, Composite, ConstructError, Context, Equals, EqualsFactory, EqualsLiteral,
    EqualsLiteralFactory, EvaluationReport, FnReadApi, ReadApi, Rule, RuleFactory,
};
