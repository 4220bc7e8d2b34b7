use std::collections::BTreeMap;
use std::{fs, path::Path};

use anyhow::{Context, Result, ensure};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{GrubberConfig, PluralVersion, validate_grubber_config};

pub const CONFIG_FILE_NAME: &str = "locale-grubber.config.json";

/// Selects which files inside a module directory are scanned, and how.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRule {
    /// Glob patterns, relative to the module directory.
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /// Grubber kind name to its options. `BTreeMap` keeps the run order
    /// deterministic.
    pub grubbers: BTreeMap<String, GrubberConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Glob patterns selecting module directories under each scanned root.
    pub include_dirs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_dirs: Vec<String>,
    pub file_rules: Vec<FileRule>,
    #[serde(default = "default_i18n_dir_name")]
    pub i18n_dir_name: String,
    /// Output language codes, order-preserving.
    pub languages: Vec<String>,
    #[serde(default)]
    pub i18next_plural: PluralVersion,
}

fn default_i18n_dir_name() -> String {
    "i18n".to_string()
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            include_dirs: vec!["src/modules/*".to_string()],
            exclude_dirs: vec!["**/node_modules/**".to_string()],
            file_rules: vec![FileRule {
                include: vec!["**/*.html".to_string(), "**/*.ts".to_string()],
                exclude: vec!["**/*.spec.ts".to_string()],
                grubbers: BTreeMap::from([(
                    "regexp".to_string(),
                    GrubberConfig {
                        patterns: vec![
                            r"'(?P<token>[\w.-]+)'\s*\|\s*translate".to_string(),
                            r"'(?P<plural>[\w.-]+)'\s*\|\s*pluralize\b[^|]*\|\s*translate"
                                .to_string(),
                        ],
                        rules: Vec::new(),
                    },
                )]),
            }],
            i18n_dir_name: default_i18n_dir_name(),
            languages: vec!["en".to_string()],
            i18next_plural: PluralVersion::Disabled,
        }
    }
}

impl Configuration {
    /// Validate configuration values.
    ///
    /// Everything that would make a scan fail later is rejected here,
    /// before any file is read: invalid glob patterns, empty language or
    /// directory lists, unknown grubber kinds and patterns that do not
    /// compile.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.include_dirs.is_empty(),
            "'includeDirs' must not be empty"
        );
        ensure!(!self.languages.is_empty(), "'languages' must not be empty");

        for pattern in self.include_dirs.iter().chain(&self.exclude_dirs) {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in dirs: \"{}\"", pattern))?;
        }

        for rule in &self.file_rules {
            ensure!(
                !rule.include.is_empty(),
                "'fileRules[].include' must not be empty"
            );
            for pattern in rule.include.iter().chain(&rule.exclude) {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in file rule: \"{}\"", pattern)
                })?;
            }
            for (name, grubber) in &rule.grubbers {
                validate_grubber_config(name, grubber)?;
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Configuration::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn load_config(path: &Path) -> Result<Configuration> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Configuration = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
