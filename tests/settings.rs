use std::path::PathBuf;

use model_rules::config::Settings;
use model_rules::translate::{EXISTS_MODEL, UNIQUE_MODEL};
use model_rules::{PersistenceMode, QueryAdapter, RulesError, Translator};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("model_rules_{}_{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_without_a_file() {
    let settings = Settings::default();
    assert_eq!(settings.database, PersistenceMode::InMemory);
    assert_eq!(settings.locale, "en");
    let catalog = settings.catalog().unwrap();
    assert_eq!(catalog.translate(EXISTS_MODEL, &[]), "The resource does not exist.");
    assert_eq!(settings.adapter().unwrap().engine(), "sqlite");
}

#[test]
fn file_settings_select_database_and_translations() {
    let lines = temp_file(
        "lines.json",
        &serde_json::json!({
            "validation": {
                "exists_model": "Kein :model mit :attribute \":value\"."
            }
        })
        .to_string(),
    );
    let settings = temp_file(
        "settings.toml",
        &format!(
            "locale = \"de\"\ntranslations = {:?}\n\n[database]\nmode = \"file\"\npath = \"rules.db\"\n",
            lines.display().to_string()
        ),
    );
    let loaded = Settings::load(Some(settings.as_path())).unwrap();
    assert_eq!(loaded.locale, "de");
    assert_eq!(loaded.database, PersistenceMode::File("rules.db".to_string()));
    let catalog = loaded.catalog().unwrap();
    assert_eq!(catalog.locale(), "de");
    assert_eq!(
        catalog.translate(
            EXISTS_MODEL,
            &[("model", "user".to_string()), ("attribute", "id".to_string()), ("value", "1".to_string())]
        ),
        "Kein user mit id \"1\"."
    );
    // not bundled for other locales
    assert_eq!(catalog.translate(UNIQUE_MODEL, &[]), UNIQUE_MODEL);
    let _ = std::fs::remove_file(lines);
    let _ = std::fs::remove_file(settings);
}

#[test]
fn missing_language_file_is_a_config_error() {
    let settings = Settings {
        translations: Some(PathBuf::from("/nonexistent/model_rules/lines.toml")),
        ..Settings::default()
    };
    assert!(matches!(settings.catalog(), Err(RulesError::Config(_))));
}
