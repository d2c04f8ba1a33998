//! Checks that a referenced record exists.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::message::{Messages, RuleKind};
use crate::model::{Model, RecordType};
use crate::query::{Query, Refinement};
use crate::rule::{base_query, Context, Outcome, Rule};
use crate::value::Value;

/// Passes when at least one record matches `key == value`.
///
/// Soft-deleted records do not count unless [`ExistsRule::include_soft_deleted`]
/// is set. With [`ExistsRule::uuid`] a value that is not UUID-shaped fails
/// without a query being issued.
#[derive(Clone)]
pub struct ExistsRule {
    record: RecordType,
    key: Option<String>,
    refinement: Option<Refinement>,
    include_soft_deleted: bool,
    uuid: bool,
    messages: Messages,
}

impl ExistsRule {
    pub fn new(record: RecordType) -> Self {
        Self {
            record,
            key: None,
            refinement: None,
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
    pub fn message(&self, ctx: &Context<'_>, attribute: &str, value: &Value) -> String {
        self.messages
            .source(RuleKind::Exists)
            .resolve(ctx.translator, attribute, &self.record, value)
    }
}

impl Rule for ExistsRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Exists
    }
    fn evaluate(&self, ctx: &Context<'_>, attribute: &str, value: &Value) -> Result<Outcome> {
        if self.uuid && !value.is_uuid() {
            debug!(rule = self.kind().name(), record = %self.record, attribute, "value is not UUID-shaped");
            return Ok(Outcome::Fail(self.message(ctx, attribute, value)));
        }
        let mut query = base_query(
            ctx.adapter,
            &self.record,
            self.key.as_deref(),
            self.refinement.as_ref(),
            value,
        );
        if self.include_soft_deleted {
            query = query.with_soft_deleted();
        }
        let found = ctx.adapter.exists(&query)?;
        debug!(rule = self.kind().name(), record = %self.record, attribute, found, "evaluated rule");
        if found {
            Ok(Outcome::Pass)
        } else {
            Ok(Outcome::Fail(self.message(ctx, attribute, value)))
        }
    }
}

impl fmt::Debug for ExistsRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ExistsRule")
            .field("record", &self.record)
            .field("key", &self.key)
            .field("refinement", &self.refinement.is_some())
            .field("include_soft_deleted", &self.include_soft_deleted)
            .field("uuid", &self.uuid)
            .field("messages", &self.messages)
            .finish()
    }
}
