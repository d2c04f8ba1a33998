//! Checks that a value is not already taken.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::message::{Messages, RuleKind};
use crate::model::{Model, RecordType};
use crate::query::{Query, Refinement};
use crate::rule::{base_query, Context, Outcome, Rule};
use crate::value::Value;

/// The record excluded from a uniqueness check, typically the one being updated.
#[derive(Debug, Clone, PartialEq)]
pub struct Ignore {
    pub id: Value,
    pub column: Option<String>,
}

/// Passes when no record matches `key == value`.
///
/// Soft-deleted records do not collide unless [`UniqueRule::include_soft_deleted`]
/// is set. With [`UniqueRule::uuid`] a value that is not UUID-shaped cannot
/// collide with anything, so the rule passes without a query being issued.
#[derive(Clone)]
pub struct UniqueRule {
    record: RecordType,
    key: Option<String>,
    refinement: Option<Refinement>,
    ignore: Option<Ignore>,
    include_soft_deleted: bool,
    uuid: bool,
    messages: Messages,
}

impl UniqueRule {
    pub fn new(record: RecordType) -> Self {
        Self {
            record,
            key: None,
            refinement: None,
            ignore: None,
            include_soft_deleted: false,
            uuid: false,
            messages: Messages::default(),
        }
    }
    pub fn of<M: Model>() -> Self {
        Self::new(M::record_type())
    }
    pub fn with(record: RecordType, key: Option<&str>, refinement: Option<Refinement>) -> Self {
        let mut rule = Self::new(record);
        rule.key = key.map(str::to_string);
        rule.refinement = refinement;
        rule
    }
    /// Match against this column instead of the primary key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
    pub fn query(mut self, refine: impl Fn(Query) -> Query + Send + Sync + 'static) -> Self {
        self.set_query(Some(Arc::new(refine)));
        self
    }
    pub fn set_query(&mut self, refinement: Option<Refinement>) {
        self.refinement = refinement;
    }
    /// Excludes the record whose primary key equals `id`.
    pub fn ignore(mut self, id: impl Into<Value>) -> Self {
        self.set_ignore(id, None::<String>);
        self
    }
    /// Excludes the records whose `column` equals `id`.
    pub fn ignore_on(mut self, id: impl Into<Value>, column: impl Into<String>) -> Self {
        self.set_ignore(id, Some(column));
        self
    }
    /// A null `id` clears the ignore, so `ignore(None::<i64>)` on a record
    /// that is being created checks against every row.
    pub fn set_ignore<C: Into<String>>(&mut self, id: impl Into<Value>, column: Option<C>) {
        let id = id.into();
        self.ignore = if id.is_null() {
            None
        } else {
            Some(Ignore { id, column: column.map(Into::into) })
        };
    }
    pub fn include_soft_deleted(mut self) -> Self {
        self.include_soft_deleted = true;
        self
    }
    pub fn uuid(mut self) -> Self {
        self.uuid = true;
        self
    }
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.set_custom(message);
        self
    }
    pub fn with_custom_translation(mut self, key: impl Into<String>) -> Self {
        self.messages.set_translation_key(key);
        self
    }
    /// Sets a literal message, or a translation key when `translated` is true.
    pub fn set_message(&mut self, message: impl Into<String>, translated: bool) {
        if translated {
            self.messages.set_translation_key(message);
        } else {
            self.messages.set_custom(message);
        }
    }
    pub fn record(&self) -> &RecordType {
        &self.record
    }
    pub fn lookup_key(&self) -> &str {
        self.key.as_deref().unwrap_or(self.record.key_name())
    }
    pub fn ignored(&self) -> Option<&Ignore> {
        self.ignore.as_ref()
    }
    pub fn message(&self, ctx: &Context<'_>, attribute: &str, value: &Value) -> String {
        self.messages
            .source(RuleKind::Unique)
            .resolve(ctx.translator, attribute, &self.record, value)
    }
}

impl Rule for UniqueRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Unique
    }
    fn evaluate(&self, ctx: &Context<'_>, attribute: &str, value: &Value) -> Result<Outcome> {
        if self.uuid && !value.is_uuid() {
            debug!(rule = self.kind().name(), record = %self.record, attribute, "skipping value that is not UUID-shaped");
            return Ok(Outcome::Pass);
        }
        let mut query = base_query(
            ctx.adapter,
            &self.record,
            self.key.as_deref(),
            self.refinement.as_ref(),
            value,
        );
        if let Some(ignore) = &self.ignore {
            let column = ignore.column.as_deref().unwrap_or(self.record.key_name());
            query = query.where_not(column, ignore.id.clone());
        }
        if self.include_soft_deleted {
            query = query.with_soft_deleted();
        }
        let taken = ctx.adapter.exists(&query)?;
        debug!(rule = self.kind().name(), record = %self.record, attribute, taken, "evaluated rule");
        if taken {
            Ok(Outcome::Fail(self.message(ctx, attribute, value)))
        } else {
            Ok(Outcome::Pass)
        }
    }
}

impl fmt::Debug for UniqueRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("UniqueRule")
            .field("record", &self.record)
            .field("key", &self.key)
            .field("refinement", &self.refinement.is_some())
            .field("ignore", &self.ignore)
            .field("include_soft_deleted", &self.include_soft_deleted)
            .field("uuid", &self.uuid)
            .field("messages", &self.messages)
            .finish()
    }
}
