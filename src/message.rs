//! Failure messages for the model rules.
//!
//! A rule may carry a literal message, a custom translation key, both, or
//! neither. The literal always wins; otherwise the custom key (or the rule's
//! default key) is translated with `attribute`, `model` and `value`
//! replacements.

use crate::model::RecordType;
use crate::translate::{Translator, EXISTS_MODEL, UNIQUE_MODEL};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Exists,
    Unique,
}

impl RuleKind {
    pub fn default_key(&self) -> &'static str {
        match self {
            RuleKind::Exists => EXISTS_MODEL,
            RuleKind::Unique => UNIQUE_MODEL,
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Exists => "exists",
            RuleKind::Unique => "unique",
        }
    }
}

/// Where the failure message of a rule comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource<'m> {
    Literal(&'m str),
    CustomKey(&'m str),
    DefaultKey(&'static str),
}

impl MessageSource<'_> {
    pub fn resolve(
        &self,
        translator: &dyn Translator,
        attribute: &str,
        record: &RecordType,
        value: &Value,
    ) -> String {
        let key = match self {
            MessageSource::Literal(message) => return message.to_string(),
            MessageSource::CustomKey(key) => *key,
            MessageSource::DefaultKey(key) => *key,
        };
        translator.translate(
            key,
            &[
                ("attribute", attribute.to_string()),
                ("model", record.display_name()),
                ("value", value.to_string()),
            ],
        )
    }
}

/// The message overrides of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    custom: Option<String>,
    translation_key: Option<String>,
}

impl Messages {
    pub fn set_custom(&mut self, message: impl Into<String>) {
        self.custom = Some(message.into());
    }
    pub fn set_translation_key(&mut self, key: impl Into<String>) {
        self.translation_key = Some(key.into());
    }
    pub fn source(&self, kind: RuleKind) -> MessageSource<'_> {
        match (&self.custom, &self.translation_key) {
            (Some(message), _) => MessageSource::Literal(message.as_str()),
            (None, Some(key)) => MessageSource::CustomKey(key.as_str()),
            (None, None) => MessageSource::DefaultKey(kind.default_key()),
        }
    }
}
