// used for the bundled query adapter
use rusqlite::types::FromSql;
use rusqlite::{params_from_iter, Connection};
use serde::Deserialize;
use std::sync::Mutex;
use tracing::{trace, warn};

use crate::error::{Result, RulesError};
use crate::query::{Operator, Query, QueryAdapter};
use crate::value::Value;

/// Where the SQLite database backing a [`SqliteAdapter`] lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(tag = "mode", content = "path", rename_all = "snake_case")]
pub enum PersistenceMode {
    #[default]
    InMemory,
    File(String),
}

// ------------- SQLite adapter -------------
pub struct SqliteAdapter {
    db: Mutex<Connection>,
}

impl SqliteAdapter {
    pub fn open(mode: &PersistenceMode) -> Result<Self> {
        let connection = match mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => Connection::open(path)?,
        };
        Ok(Self::from_connection(connection))
    }
    /// Wraps an already configured connection, e.g. one seeded by a test fixture.
    pub fn from_connection(connection: Connection) -> Self {
        Self { db: Mutex::new(connection) }
    }
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.with_connection(|db| Ok(db.execute_batch(sql)?))
    }
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let db = self.db.lock().map_err(|e| RulesError::Lock(e.to_string()))?;
        f(&db)
    }
    fn query_scalar<T: FromSql>(&self, sql: &str, query: &Query, bindings: Vec<&Value>) -> Result<T> {
        trace!(%sql, bindings = bindings.len(), "rendered rule query");
        self.with_connection(|db| {
            let mut statement = db.prepare_cached(sql).map_err(|e| {
                warn!(error = %e, table = query.record().table(), "could not prepare rule query");
                RulesError::from(e)
            })?;
            let scalar = statement.query_row(params_from_iter(bindings.iter()), |r| r.get(0))?;
            Ok(scalar)
        })
    }
}

impl QueryAdapter for SqliteAdapter {
    fn engine(&self) -> &'static str {
        "sqlite"
    }
    fn count(&self, query: &Query) -> Result<u64> {
        let (from, bindings) = render_from(query);
        let count: i64 = self.query_scalar(&format!("select count(*) {}", from), query, bindings)?;
        u64::try_from(count).map_err(|e| RulesError::Query(e.to_string()))
    }
    fn exists(&self, query: &Query) -> Result<bool> {
        let (from, bindings) = render_from(query);
        self.query_scalar(&format!("select exists(select 1 {})", from), query, bindings)
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Renders the from and where clauses of a query together with the values to bind, in order.
fn render_from(query: &Query) -> (String, Vec<&Value>) {
    let mut clauses = Vec::new();
    let mut bindings = Vec::new();
    for condition in query.conditions() {
        let column = quote(&condition.column);
        match (condition.operator, condition.value.is_null()) {
            (Operator::Equals, true) => clauses.push(format!("{} is null", column)),
            (Operator::NotEquals, true) => clauses.push(format!("{} is not null", column)),
            (operator, false) => {
                bindings.push(&condition.value);
                clauses.push(format!("{} {} ?{}", column, operator.symbol(), bindings.len()));
            }
        }
    }
    if query.excludes_soft_deleted() {
        if let Some(deleted_at) = query.record().deleted_at() {
            clauses.push(format!("{} is null", quote(deleted_at)));
        }
    }
    let table = quote(query.record().table());
    if clauses.is_empty() {
        (format!("from {}", table), bindings)
    } else {
        (format!("from {} where {}", table, clauses.join(" and ")), bindings)
    }
}
