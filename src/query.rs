//! The query seam between rules and whatever data layer backs them.
//!
//! Rules never talk to a database directly. They build a [`Query`], a plain
//! value describing a conjunction of column conditions against one
//! [`RecordType`], and hand it to a [`QueryAdapter`] for evaluation. Adapters
//! are expected to apply the soft-delete scope themselves: rows whose
//! soft-delete column is set are excluded unless the query was widened with
//! [`Query::with_soft_deleted`].

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::model::RecordType;
use crate::value::Value;

/// A custom constraint applied to a rule's query after its base predicate.
pub type Refinement = Arc<dyn Fn(Query) -> Query + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub value: Value,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {:?}", self.column, self.operator.symbol(), self.value)
    }
}

/// Which rows a query may see with respect to soft deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    WithoutSoftDeleted,
    WithSoftDeleted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    record: RecordType,
    conditions: Vec<Condition>,
    scope: Scope,
}

impl Query {
    pub fn new(record: RecordType) -> Self {
        Self { record, conditions: Vec::new(), scope: Scope::default() }
    }
    pub fn where_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            column: column.into(),
            operator: Operator::Equals,
            value: value.into(),
        });
        self
    }
    pub fn where_not(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            column: column.into(),
            operator: Operator::NotEquals,
            value: value.into(),
        });
        self
    }
    pub fn with_soft_deleted(mut self) -> Self {
        self.scope = Scope::WithSoftDeleted;
        self
    }
    pub fn record(&self) -> &RecordType {
        &self.record
    }
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
    pub fn scope(&self) -> Scope {
        self.scope
    }
    /// True when the adapter must filter out soft-deleted rows.
    pub fn excludes_soft_deleted(&self) -> bool {
        self.scope == Scope::WithoutSoftDeleted && self.record.deleted_at().is_some()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.record.table())?;
        for (i, condition) in self.conditions.iter().enumerate() {
            let joiner = if i == 0 { " where " } else { " and " };
            write!(f, "{}{}", joiner, condition)?;
        }
        if self.scope == Scope::WithSoftDeleted {
            write!(f, " (with soft deleted)")?;
        }
        Ok(())
    }
}

/// Trait implemented by data layers that can evaluate rule queries.
pub trait QueryAdapter {
    /// Returns the engine identifier (e.g. `sqlite`).
    fn engine(&self) -> &'static str;

    fn new_query(&self, record: &RecordType) -> Query {
        Query::new(record.clone())
    }

    /// Number of rows matching the query.
    fn count(&self, query: &Query) -> Result<u64>;

    /// True when at least one row matches the query.
    fn exists(&self, query: &Query) -> Result<bool> {
        Ok(self.count(query)? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_keep_insertion_order() {
        let query = Query::new(RecordType::new("Fact", "facts"))
            .where_eq("id", 1)
            .where_eq("user_id", 6)
            .where_not("id", 2);
        let operators: Vec<Operator> = query.conditions().iter().map(|c| c.operator).collect();
        assert_eq!(operators, vec![Operator::Equals, Operator::Equals, Operator::NotEquals]);
        assert_eq!(
            query.to_string(),
            "facts where id = Integer(1) and user_id = Integer(6) and id != Integer(2)"
        );
    }

    #[test]
    fn soft_delete_scope_only_matters_for_soft_deleting_records() {
        let plain = Query::new(RecordType::new("Tag", "tags"));
        assert!(!plain.excludes_soft_deleted());
        let soft = Query::new(RecordType::new("User", "users").with_soft_deletes("deleted_at"));
        assert!(soft.excludes_soft_deleted());
        assert!(!soft.with_soft_deleted().excludes_soft_deleted());
    }
}
