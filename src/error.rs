use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Query error: {0}")]
    Query(String),
    #[error("Translation error: {0}")]
    Translation(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, RulesError>;

// Helper conversions
impl From<rusqlite::Error> for RulesError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}

impl From<::config::ConfigError> for RulesError {
    fn from(e: ::config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
