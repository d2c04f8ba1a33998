//! Model rules – existence and uniqueness validation against an ORM-style data layer.
//!
//! Two rules are provided:
//! * [`exists::ExistsRule`] passes when a record matching `key == value` exists.
//! * [`unique::UniqueRule`] passes when no such record exists, optionally
//!   ignoring one record (typically the one being updated).
//!
//! Both are thin adapters: each evaluation builds exactly one [`query::Query`]
//! and asks a [`query::QueryAdapter`] whether it matches anything. Neither rule
//! counts soft-deleted records unless told to, both accept a refinement
//! closure that adds further constraints, and both can be restricted to
//! UUID-shaped input (Existence fails such input, Uniqueness skips it).
//!
//! ## Modules
//! * [`value`] – The [`value::Value`] under validation and the UUID-shape check.
//! * [`model`] – The [`model::Model`] trait and the [`model::RecordType`] descriptor.
//! * [`query`] – The query value and the adapter trait rules evaluate against.
//! * [`persist`] – A SQLite [`persist::SqliteAdapter`].
//! * [`translate`] – The [`translate::Translator`] trait and the bundled [`translate::Catalog`].
//! * [`message`] – Failure message selection and interpolation.
//! * [`rule`] – The [`rule::Rule`] trait and the evaluation [`rule::Context`].
//! * [`config`] – [`config::Settings`] for wiring an adapter and a catalog.
//!
//! ## Messages
//! A literal message set with `with_message` is returned verbatim. Otherwise
//! the key set with `with_custom_translation`, or the default
//! `model-rules::validation.exists_model` / `model-rules::validation.unique_model`,
//! is translated with the `:attribute`, `:model` and `:value` replacements,
//! where `:model` is the last segment of the record identifier in lower case.
//!
//! ## Quick Start
//! ```
//! use model_rules::{Catalog, Context, ExistsRule, Model, Rule, SqliteAdapter, UniqueRule};
//! use rusqlite::Connection;
//!
//! struct User;
//! impl Model for User {
//!     const IDENTIFIER: &'static str = "app::models::User";
//!     const TABLE: &'static str = "users";
//!     const DELETED_AT: Option<&'static str> = Some("deleted_at");
//! }
//!
//! let conn = Connection::open_in_memory().unwrap();
//! conn.execute_batch(
//!     "create table users (id integer primary key, email text, deleted_at text null);
//!      insert into users (id, email) values (1, 'alice@example.com');",
//! ).unwrap();
//! let adapter = SqliteAdapter::from_connection(conn);
//! let catalog = Catalog::english();
//! let ctx = Context::new(&adapter, &catalog);
//!
//! let exists = ExistsRule::of::<User>();
//! assert!(exists.evaluate(&ctx, "user_id", &1.into()).unwrap().passed());
//!
//! let unique = UniqueRule::of::<User>().key("email").ignore(1);
//! assert!(unique.evaluate(&ctx, "email", &"alice@example.com".into()).unwrap().passed());
//! ```

pub mod config;
pub mod error;
pub mod exists;
pub mod message;
pub mod model;
pub mod persist;
pub mod query;
pub mod rule;
pub mod translate;
pub mod unique;
pub mod value;

pub use error::{Result, RulesError};
pub use exists::ExistsRule;
pub use message::{MessageSource, RuleKind};
pub use model::{Model, RecordType};
pub use persist::{PersistenceMode, SqliteAdapter};
pub use query::{Query, QueryAdapter, Refinement};
pub use rule::{Context, Outcome, Rule};
pub use translate::{Catalog, Translator};
pub use unique::UniqueRule;
pub use value::Value;
