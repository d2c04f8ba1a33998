//! Record types: the schema facts a rule needs in order to build its query.
//!
//! A [`Model`] is implemented once per entity, with the static facts carried
//! as associated constants. Rules work with the runtime
//! [`RecordType`] descriptor so that heterogeneous rules can share one
//! adapter.

use std::fmt;

pub trait Model {
    // static stuff which needs to be implemented downstream
    const IDENTIFIER: &'static str;
    const TABLE: &'static str;
    // overridable defaults
    const KEY_NAME: &'static str = "id";
    const DELETED_AT: Option<&'static str> = None;

    fn record_type() -> RecordType {
        RecordType {
            identifier: Self::IDENTIFIER.to_string(),
            table: Self::TABLE.to_string(),
            key_name: Self::KEY_NAME.to_string(),
            deleted_at: Self::DELETED_AT.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordType {
    identifier: String,
    table: String,
    key_name: String,
    deleted_at: Option<String>,
}

impl RecordType {
    pub fn new(identifier: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            table: table.into(),
            key_name: "id".to_string(),
            deleted_at: None,
        }
    }
    pub fn of<M: Model>() -> Self {
        M::record_type()
    }
    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }
    /// Marks the record type as soft-deleting through the given timestamp column.
    pub fn with_soft_deletes(mut self, column: impl Into<String>) -> Self {
        self.deleted_at = Some(column.into());
        self
    }
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
    pub fn table(&self) -> &str {
        &self.table
    }
    pub fn key_name(&self) -> &str {
        &self.key_name
    }
    pub fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
    /// The last path segment of the identifier, lower-cased (`app::models::User` -> `user`).
    pub fn display_name(&self) -> String {
        self.identifier
            .rsplit(|c: char| c == ':' || c == '\\' || c == '/' || c == '.')
            .next()
            .unwrap_or(&self.identifier)
            .to_lowercase()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}
