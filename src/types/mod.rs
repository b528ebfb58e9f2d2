mod context;
mod equals;
mod error;
mod factory;
mod literal;
mod read;
mod report;
mod rule;

pub use context::Context;
pub use equals::Equals;
pub use error::ConstructError;
pub use factory::{EqualsFactory, EqualsLiteralFactory, RuleFactory};
pub use literal::EqualsLiteral;
pub use read::{from_fn, FnReadApi, ReadApi};
pub use report::EvaluationReport;
pub use rule::{Composite, Rule};
