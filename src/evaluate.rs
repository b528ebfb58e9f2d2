use std::cell::RefCell;
use std::time::Instant;

use tracing::trace;

use crate::types::{Composite, Equals, EqualsLiteral};
use crate::{EvaluationReport, ReadApi, Rule};

pub(crate) fn satisfied<A, R>(rule: &Rule<A>, api: &R) -> Result<bool, R::Error>
where
    R: ReadApi + ?Sized,
{
    match rule {
        Rule::EqualsLiteral(leaf) => eval_literal(leaf, api),
        Rule::Equals(leaf) => eval_equals(leaf, api),
        Rule::And(composite) => eval_and(composite, api),
        Rule::Or(composite) => eval_or(composite, api),
        Rule::Not(nested) => Ok(!satisfied(&**nested, api)?),
    }
}

pub(crate) fn satisfied_detailed<A, R>(rule: &Rule<A>, api: &R) -> Result<EvaluationReport, R::Error>
where
    R: ReadApi + ?Sized,
{
    let start = Instant::now();
    let recorder = Recorder {
        inner: api,
        lookups: RefCell::new(Vec::new()),
    };
    let result = satisfied(rule, &recorder)?;
    let duration = start.elapsed();
    Ok(EvaluationReport::new(
        result,
        recorder.lookups.into_inner(),
        duration,
    ))
}

fn eval_literal<A, R>(rule: &EqualsLiteral<A>, api: &R) -> Result<bool, R::Error>
where
    R: ReadApi + ?Sized,
{
    let value = api.get(rule.key())?;
    let result = rule.satisfiable(rule.key(), value.as_deref());
    trace!(key = rule.key(), result, "equals-literal evaluated");
    Ok(result)
}

fn eval_equals<A, R>(rule: &Equals<A>, api: &R) -> Result<bool, R::Error>
where
    R: ReadApi + ?Sized,
{
    let Some((first, rest)) = rule.keys().split_first() else {
        return Ok(true);
    };
    let reference = api.get(first)?;
    for key in rest {
        let value = api.get(key)?;
        if value != reference {
            trace!(reference = %first, key = %key, "equals mismatch");
            return Ok(false);
        }
    }
    Ok(true)
}

fn eval_and<A, R>(composite: &Composite<A>, api: &R) -> Result<bool, R::Error>
where
    R: ReadApi + ?Sized,
{
    for (index, rule) in composite.rules().iter().enumerate() {
        if !satisfied(rule, api)? {
            trace!(index, "AND short-circuited on false");
            return Ok(false);
        }
    }
    Ok(true)
}

fn eval_or<A, R>(composite: &Composite<A>, api: &R) -> Result<bool, R::Error>
where
    R: ReadApi + ?Sized,
{
    for (index, rule) in composite.rules().iter().enumerate() {
        if satisfied(rule, api)? {
            trace!(index, "OR short-circuited on true");
            return Ok(true);
        }
    }
    Ok(false)
}

/// Forwards lookups and remembers each requested key.
struct Recorder<'a, R: ?Sized> {
    inner: &'a R,
    lookups: RefCell<Vec<String>>,
}

impl<R: ReadApi + ?Sized> ReadApi for Recorder<'_, R> {
    type Error = R::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.lookups.borrow_mut().push(key.to_owned());
        self.inner.get(key)
    }
}
