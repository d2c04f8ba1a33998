//! Settings for wiring the bundled adapter and translation catalog.
//!
//! Values are read, in increasing priority, from built-in defaults, an
//! optional settings file and `MODEL_RULES_*` environment variables
//! (`MODEL_RULES_LOCALE=de`, `MODEL_RULES_DATABASE__MODE=file`,
//! `MODEL_RULES_DATABASE__PATH=app.db`).

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::persist::{PersistenceMode, SqliteAdapter};
use crate::translate::{Catalog, NAMESPACE};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub database: PersistenceMode,
    pub locale: String,
    /// Language file overriding the bundled lines of this crate.
    pub translations: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: PersistenceMode::InMemory,
            locale: "en".to_string(),
            translations: None,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let settings: Settings = builder
            .add_source(Environment::with_prefix("MODEL_RULES").prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()?;
        info!(database = ?settings.database, locale = %settings.locale, "loaded settings");
        Ok(settings)
    }
    pub fn adapter(&self) -> Result<SqliteAdapter> {
        SqliteAdapter::open(&self.database)
    }
    /// The catalog for the configured locale. English starts from the bundled
    /// lines; a configured language file is layered on top of them.
    pub fn catalog(&self) -> Result<Catalog> {
        let mut catalog = if self.locale == "en" {
            Catalog::english()
        } else {
            Catalog::new(self.locale.clone())
        };
        if let Some(path) = &self.translations {
            catalog.load(path, Some(NAMESPACE))?;
        }
        Ok(catalog)
    }
}
