//! Translation of validation messages.
//!
//! Keys follow the `namespace::group.line` convention (the namespace is
//! optional). A [`Catalog`] is the bundled [`Translator`]: it owns the lines
//! for one locale and interpolates `:placeholder` replacements. A key without
//! a line translates to itself, so a misconfigured key still yields something
//! readable in the failure message.

use std::collections::HashMap;
use std::path::Path;

use ::config::{Config, File};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::error::{Result, RulesError};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").unwrap();
}

/// Namespace of the lines shipped with this crate.
pub const NAMESPACE: &str = "model-rules";

pub const EXISTS_MODEL: &str = "model-rules::validation.exists_model";
pub const UNIQUE_MODEL: &str = "model-rules::validation.unique_model";

pub trait Translator {
    fn translate(&self, key: &str, replacements: &[(&str, String)]) -> String;
}

#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    lines: HashMap<String, String>,
}

impl Catalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self { locale: locale.into(), lines: HashMap::new() }
    }
    /// An English catalog preloaded with the default rule messages.
    pub fn english() -> Self {
        let mut catalog = Self::new("en");
        catalog.add_lines(
            [
                ("validation.exists_model", "The resource does not exist."),
                ("validation.unique_model", "The resource already exists."),
            ],
            Some(NAMESPACE),
        );
        catalog
    }
    pub fn locale(&self) -> &str {
        &self.locale
    }
    /// Adds (or replaces) lines, given as `group.line` keys, under an optional namespace.
    pub fn add_lines<K, V>(&mut self, lines: impl IntoIterator<Item = (K, V)>, namespace: Option<&str>)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, line) in lines {
            let key = match namespace {
                Some(namespace) => format!("{}::{}", namespace, key.as_ref()),
                None => key.as_ref().to_string(),
            };
            self.lines.insert(key, line.into());
        }
    }
    pub fn line(&self, key: &str) -> Option<&str> {
        self.lines.get(key).map(String::as_str)
    }
    /// Loads a language file keyed by group, e.g.
    ///
    /// ```toml
    /// [validation]
    /// exists_model = "A :model with the :attribute \":value\" does not exist."
    /// ```
    ///
    /// The format is picked from the file extension.
    pub fn load(&mut self, path: impl AsRef<Path>, namespace: Option<&str>) -> Result<()> {
        let path = path.as_ref();
        let groups: HashMap<String, HashMap<String, ::config::Value>> = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        let mut lines = Vec::new();
        for (group, entries) in groups {
            for (name, line) in entries {
                let line = line.into_string().map_err(|e| {
                    RulesError::Translation(format!(
                        "line {}.{} in {} is not a string: {}",
                        group,
                        name,
                        path.display(),
                        e
                    ))
                })?;
                lines.push((format!("{}.{}", group, name), line));
            }
        }
        self.add_lines(lines, namespace);
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, replacements: &[(&str, String)]) -> String {
        match self.line(key) {
            Some(line) => interpolate(line, replacements),
            None => key.to_string(),
        }
    }
}

/// Replaces `:name` with the value, `:Name` with the value capitalized and
/// `:NAME` with the value upper-cased. The longest matching name wins and any
/// trailing characters are kept, so `:attributes` becomes `ids` for an `id`
/// attribute. Unknown placeholders are left as they are.
pub fn interpolate(line: &str, replacements: &[(&str, String)]) -> String {
    PLACEHOLDER
        .replace_all(line, |caps: &Captures| {
            let name = &caps[1];
            let mut best: Option<(usize, String)> = None;
            for (key, value) in replacements.iter().filter(|(key, _)| !key.is_empty()) {
                let variants = [
                    (key.to_string(), value.clone()),
                    (key.to_uppercase(), value.to_uppercase()),
                    (capitalize(key), capitalize(value)),
                ];
                for (variant, replaced) in variants {
                    let longer = best.as_ref().is_none_or(|(len, _)| variant.len() > *len);
                    if longer && name.starts_with(variant.as_str()) {
                        best = Some((variant.len(), replaced));
                    }
                }
            }
            match best {
                Some((len, replaced)) => format!("{}{}", replaced, &name[len..]),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
