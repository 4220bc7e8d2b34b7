//! Locale dictionary files: flatten, merge, read and write.
//!
//! Each scanned module directory owns one JSON file per language at
//! `<dir>/<i18nDirName>/<module>.<lang>.json`. Files hold a nested object
//! tree; the engine works with flat dot-path tokens, so this module
//! converts between the two and reconciles freshly extracted tokens with
//! the previous file contents.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::utils::module_name;

/// Flat token map: dot-path key to translated value. `BTreeMap` keeps
/// output deterministic (lexical key order, a deliberate choice).
pub type Tokens = BTreeMap<String, Value>;

/// Path of the locale file for one module directory and language.
pub fn locale_file_path(dir: &Path, i18n_dir_name: &str, language: &str) -> PathBuf {
    dir.join(i18n_dir_name)
        .join(format!("{}.{}.json", module_name(dir), language))
}

/// Reads and flattens an existing locale file.
///
/// A missing file is not an error (`None`); a file that exists but is not
/// valid JSON, or whose root is not an object, is.
pub fn read_locale_tokens(path: &Path) -> Result<Option<Tokens>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read locale file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse locale file: {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(Some(flatten_tree(&map))),
        _ => bail!(
            "Root of locale file must be an object: {}",
            path.display()
        ),
    }
}

/// Flattens a nested tree into dot-path tokens.
pub fn flatten_tree(tree: &Map<String, Value>) -> Tokens {
    let mut tokens = Tokens::new();
    flatten_into(tree, "", &mut tokens);
    tokens
}

fn flatten_into(tree: &Map<String, Value>, prefix: &str, tokens: &mut Tokens) {
    for (key, value) in tree {
        let token = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(inner, &token, tokens),
            leaf => {
                tokens.insert(token, leaf.clone());
            }
        }
    }
}

/// Reconciles extracted tokens with the previous file contents.
///
/// Extracted keys keep their old value when one exists; new keys get a
/// `! <key>` placeholder so untranslated entries are easy to spot. Keys
/// that are no longer extracted are dropped.
pub fn merge_tokens(extracted: &[String], old: &Tokens) -> Tokens {
    extracted
        .iter()
        .map(|token| {
            let value = old
                .get(token)
                .cloned()
                .unwrap_or_else(|| Value::String(format!("! {token}")));
            (token.clone(), value)
        })
        .collect()
}

/// Builds the nested tree back from flat tokens.
///
/// Tokens insert in iteration order; a leaf under an existing scalar
/// replaces it with an object (the deeper path wins).
pub fn tokens_to_tree(tokens: &Tokens) -> Map<String, Value> {
    let mut root = Map::new();
    for (token, value) in tokens {
        let path: Vec<&str> = token.split('.').collect();
        insert_nested(&mut root, &path, value.clone());
    }
    root
}

fn insert_nested(node: &mut Map<String, Value>, path: &[&str], value: Value) {
    let [head, rest @ ..] = path else { return };

    if rest.is_empty() {
        node.insert((*head).to_string(), value);
        return;
    }

    let next = node
        .entry((*head).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !next.is_object() {
        *next = Value::Object(Map::new());
    }
    if let Value::Object(inner) = next {
        insert_nested(inner, rest, value);
    }
}

/// Writes a locale file with 2-space pretty formatting and a trailing
/// newline, creating the i18n directory on demand.
pub fn write_locale_file(path: &Path, tokens: &Tokens) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let tree = Value::Object(tokens_to_tree(tokens));
    let content = serde_json::to_string_pretty(&tree).context("Failed to serialize locale file")?;
    fs::write(path, format!("{}\n", content))
        .with_context(|| format!("Failed to write locale file: {}", path.display()))?;
    Ok(())
}
