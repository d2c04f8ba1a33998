//! The seam between model rules and the validation pipeline that runs them.

use crate::error::Result;
use crate::message::RuleKind;
use crate::model::RecordType;
use crate::query::{Query, QueryAdapter, Refinement};
use crate::translate::Translator;
use crate::value::Value;

/// The collaborators a rule needs during one evaluation.
#[derive(Clone, Copy)]
pub struct Context<'c> {
    pub adapter: &'c dyn QueryAdapter,
    pub translator: &'c dyn Translator,
}

impl<'c> Context<'c> {
    pub fn new(adapter: &'c dyn QueryAdapter, translator: &'c dyn Translator) -> Self {
        Self { adapter, translator }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(String),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Pass => None,
            Outcome::Fail(message) => Some(message),
        }
    }
}

pub trait Rule {
    fn kind(&self) -> RuleKind;

    /// Evaluates the rule for one attribute. A value that does not satisfy
    /// the rule is an `Ok(Outcome::Fail(..))`; an `Err` is a data layer fault.
    fn evaluate(&self, ctx: &Context<'_>, attribute: &str, value: &Value) -> Result<Outcome>;

    /// Calls `fail` with the resolved message when the rule is not satisfied.
    fn validate(
        &self,
        ctx: &Context<'_>,
        attribute: &str,
        value: &Value,
        fail: &mut dyn FnMut(String),
    ) -> Result<()> {
        if let Outcome::Fail(message) = self.evaluate(ctx, attribute, value)? {
            fail(message);
        }
        Ok(())
    }
}

/// `key == value` against the record type, falling back to its primary key,
/// followed by the refinement if one is set.
pub(crate) fn base_query(
    adapter: &dyn QueryAdapter,
    record: &RecordType,
    key: Option<&str>,
    refinement: Option<&Refinement>,
    value: &Value,
) -> Query {
    let query = adapter
        .new_query(record)
        .where_eq(key.unwrap_or(record.key_name()), value.clone());
    match refinement {
        Some(refine) => refine(query),
        None => query,
    }
}
